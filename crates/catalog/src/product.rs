use serde::{Deserialize, Serialize};

use invtrack_core::Entity;

/// Base unit a product is counted in.
///
/// Serialized with the wire values used by the stored snapshots ("UN", "KG",
/// "L").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitType {
    #[serde(rename = "UN")]
    Piece,
    #[serde(rename = "KG")]
    Kilogram,
    #[serde(rename = "L")]
    Liter,
}

impl UnitType {
    /// Short label as it appears on forms and exported sheets.
    pub fn label(&self) -> &'static str {
        match self {
            UnitType::Piece => "UN",
            UnitType::Kilogram => "KG",
            UnitType::Liter => "L",
        }
    }
}

impl core::fmt::Display for UnitType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Product status lifecycle. Only Active products seed new counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    #[serde(rename = "Ativo")]
    Active,
    #[serde(rename = "Inativo")]
    Inactive,
}

/// Catalog record: a countable product with its packaging conversion factors.
///
/// The `code` is the product's identity and is immutable once created; edits
/// target records by their original code. The three factors are the
/// quantity-per-box, quantity-per-pack and quantity-per-loose-unit
/// multipliers fed to the conversion engine, all non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub unit: UnitType,
    pub factor_box: f64,
    pub factor_pack: f64,
    pub factor_unit: f64,
    pub status: ProductStatus,
}

impl Product {
    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }
}

impl Entity for Product {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}
