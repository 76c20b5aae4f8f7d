//! Unit conversion engine.
//!
//! Maps heterogeneous raw counts (boxes / packs / loose units) to a single
//! canonical quantity in the product's base unit.

use invtrack_catalog::Product;

/// Consolidate raw counts into the canonical quantity.
///
/// `total = boxes*factor_box + packs*factor_pack + units*factor_unit`,
/// rounded to exactly 3 decimal places, half away from zero, so repeated
/// edits do not accumulate floating-point drift.
///
/// Callers reject negative raw inputs before reaching this function; for the
/// non-negative domain the result is never negative.
pub fn consolidate(
    factor_box: f64,
    factor_pack: f64,
    factor_unit: f64,
    boxes: f64,
    packs: f64,
    units: f64,
) -> f64 {
    round3(boxes * factor_box + packs * factor_pack + units * factor_unit)
}

/// [`consolidate`] with the factors taken from a catalog record.
pub fn consolidate_product(product: &Product, boxes: f64, packs: f64, units: f64) -> f64 {
    consolidate(
        product.factor_box,
        product.factor_pack,
        product.factor_unit,
        boxes,
        packs,
        units,
    )
}

/// Round to 3 decimal places, half away from zero.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
