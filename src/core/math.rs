use glam::DVec3;

/// Converts each component from degrees to radians, keeping the axis order.
pub fn degrees_to_radians(degrees: DVec3) -> DVec3 {
    DVec3::new(
        degrees.x.to_radians(),
        degrees.y.to_radians(),
        degrees.z.to_radians(),
    )
}

/// (X, Y, Z) to (Z, X, Y)
pub fn reorder_zxy(value: DVec3) -> DVec3 {
    DVec3::new(value.z, value.x, value.y)
}

/// Converts a `$definebone` rotation (degrees, X Y Z) into the SMD skeleton
/// rotation (radians, Z X Y).
///
/// The same function is used for both poses of a pair so a given input always
/// produces the same bits.
pub fn smd_rotation(degrees: DVec3) -> DVec3 {
    reorder_zxy(degrees_to_radians(degrees))
}
