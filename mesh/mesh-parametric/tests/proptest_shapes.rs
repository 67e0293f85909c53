//! Property-based tests: every generated shape is a closed, outward-wound
//! mesh that passes validation.
//!
//! Run with: cargo test -p mesh-parametric -- proptest

use mesh_parametric::{
    GearParams, SEGMENTS_PER_TOOTH, ShapeParameters, SpringParams, ThreadParams, generate,
};
use mesh_repair::{ValidationOptions, validate_mesh_with_options};
use mesh_types::Mesh;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_gear() -> impl Strategy<Value = GearParams> {
    (0.2..5.0f64, 3u32..80, 0.0..45.0f64, 0.1..20.0f64)
        .prop_map(|(module, teeth, angle, thickness)| GearParams {
            module,
            teeth,
            pressure_angle_deg: angle,
            thickness,
        })
}

fn arb_spring() -> impl Strategy<Value = SpringParams> {
    (0.25..8.0f64, 1.0..30.0f64, 0.05..0.45f64, 0.0..10.0f64).prop_map(
        |(coils, radius, wire_fraction, pitch)| SpringParams {
            coils,
            radius,
            wire_radius: radius * wire_fraction,
            pitch,
        },
    )
}

fn arb_thread() -> impl Strategy<Value = ThreadParams> {
    (2.0..30.0f64, 0.5..0.95f64, 0.3..4.0f64, 0.5..40.0f64, 30.0..90.0f64).prop_map(
        |(major, minor_fraction, pitch, length, angle)| ThreadParams {
            major_diameter: major,
            minor_diameter: major * minor_fraction,
            pitch,
            length,
            thread_angle_deg: angle,
        },
    )
}

fn arb_shape() -> impl Strategy<Value = ShapeParameters> {
    prop_oneof![
        arb_gear().prop_map(ShapeParameters::Gear),
        arb_spring().prop_map(ShapeParameters::Spring),
        arb_thread().prop_map(ShapeParameters::Thread),
    ]
}

/// Structural and topological checks only; scale warnings depend on the
/// random sizes and are not what these tests are about.
fn check(mesh: &Mesh) -> Result<(), TestCaseError> {
    let options = ValidationOptions::default()
        .with_minimum_feature_size(0.0)
        .with_max_build_dimension(f64::INFINITY);
    let report = validate_mesh_with_options(mesh, &options);
    prop_assert!(report.errors.is_empty(), "errors: {:?}", report.errors);
    prop_assert!(report.is_manifold, "{}", report);
    prop_assert_eq!(report.degenerate_triangle_count, 0);
    prop_assert!(mesh.signed_volume() > 0.0, "inside-out mesh");
    Ok(())
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every generated shape validates without errors, closed and outward.
    #[test]
    fn generated_shapes_are_closed(shape in arb_shape()) {
        let mesh = generate(&shape).unwrap();
        check(&mesh)?;
    }

    /// Gear vertex count is teeth x segments per tooth x 2.
    #[test]
    fn gear_vertex_count(gear in arb_gear()) {
        let mesh = generate(&ShapeParameters::Gear(gear)).unwrap();
        prop_assert_eq!(
            mesh.vertex_count(),
            gear.teeth as usize * SEGMENTS_PER_TOOTH * 2
        );
        let n = mesh.vertex_count();
        for face in mesh.faces() {
            for &v in face {
                prop_assert!((v as usize) < n);
            }
        }
    }

    /// Generation is deterministic.
    #[test]
    fn generation_is_deterministic(shape in arb_shape()) {
        prop_assert_eq!(generate(&shape).unwrap(), generate(&shape).unwrap());
    }

    /// Out-of-range parameters never produce a mesh.
    #[test]
    fn invalid_parameters_fail(gear in arb_gear(), teeth in 0u32..3) {
        let bad = GearParams { teeth, ..gear };
        prop_assert!(generate(&ShapeParameters::Gear(bad)).is_err());
    }
}

#[test]
fn three_tooth_gear_is_closed() {
    let mesh = generate(&GearParams::new(1.0, 3, 20.0, 1.0).unwrap().into()).unwrap();
    check(&mesh).unwrap();
}

#[test]
fn flat_spiral_is_closed() {
    let mesh = generate(&SpringParams::new(2.0, 5.0, 0.5, 0.0).unwrap().into()).unwrap();
    check(&mesh).unwrap();
}
