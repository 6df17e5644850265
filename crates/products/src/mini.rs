//! Mini product: the reduced product/variant projection used by listings.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use storefront_core::{
    Entity, FieldSet, FromFields, HydrationError, OrderNumber, ProductId, VariantId,
};

use crate::attributes::AttributeBag;
use crate::entities::{Manufacturer, PriceGroup, Tax, Unit};

/// Product-level columns (`s_articles`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductData {
    pub id: ProductId,
    pub manufacturer_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub description_long: Option<String>,
    pub shipping_time: Option<String>,
    pub created_at: Option<NaiveDate>,
    pub active: bool,
    pub tax_id: Option<i64>,
    pub pseudo_sales: i64,
    pub top_seller: bool,
    pub meta_title: Option<String>,
    pub keywords: Option<String>,
    pub changed_at: Option<NaiveDateTime>,
    pub price_group_id: Option<i64>,
    pub price_group_active: bool,
    pub filter_group_id: Option<i64>,
    pub last_stock: bool,
    pub cross_bundle_look: bool,
    pub notification: bool,
    pub template: Option<String>,
    pub mode: i64,
    pub main_variant_id: Option<i64>,
    pub available_from: Option<NaiveDateTime>,
    pub available_to: Option<NaiveDateTime>,
    pub configurator_set_id: Option<i64>,
}

impl FromFields for ProductData {
    fn from_fields(f: &FieldSet) -> Result<Self, HydrationError> {
        let id = ProductId::new(f.required_i64("id")?).map_err(|source| HydrationError::Invalid {
            entity: f.entity().to_string(),
            source,
        })?;

        Ok(Self {
            id,
            manufacturer_id: f.optional_i64("supplierID")?,
            name: f.required_string("name")?,
            description: f.optional_string("description")?,
            description_long: f.optional_string("description_long")?,
            shipping_time: f.optional_string("shippingtime")?,
            created_at: f.optional_date("datum")?,
            active: f.required_bool("active")?,
            tax_id: f.optional_i64("taxID")?,
            pseudo_sales: f.optional_i64("pseudosales")?.unwrap_or(0),
            top_seller: f.required_bool("topseller")?,
            meta_title: f.optional_string("metaTitle")?,
            keywords: f.optional_string("keywords")?,
            changed_at: f.optional_datetime("changetime")?,
            price_group_id: f.optional_i64("pricegroupID")?,
            price_group_active: f.required_bool("pricegroupActive")?,
            filter_group_id: f.optional_i64("filtergroupID")?,
            last_stock: f.required_bool("laststock")?,
            cross_bundle_look: f.required_bool("crossbundlelook")?,
            notification: f.required_bool("notification")?,
            template: f.optional_string("template")?,
            mode: f.optional_i64("mode")?.unwrap_or(0),
            main_variant_id: f.optional_i64("main_detail_id")?,
            available_from: f.optional_datetime("available_from")?,
            available_to: f.optional_datetime("available_to")?,
            configurator_set_id: f.optional_i64("configurator_set_id")?,
        })
    }
}

/// Variant-level columns (`s_articles_details`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantData {
    pub id: VariantId,
    pub number: OrderNumber,
    pub supplier_number: Option<String>,
    pub kind: i64,
    pub additional_text: Option<String>,
    pub impressions: i64,
    pub sales: i64,
    pub active: bool,
    pub in_stock: Option<i64>,
    pub stock_min: Option<i64>,
    pub weight: Option<Decimal>,
    pub position: i64,
    pub width: Option<Decimal>,
    pub height: Option<Decimal>,
    pub length: Option<Decimal>,
    pub ean: Option<String>,
    pub unit_id: Option<i64>,
    pub purchase_steps: Option<i64>,
    pub max_purchase: Option<i64>,
    pub min_purchase: Option<i64>,
    pub purchase_unit: Option<Decimal>,
    pub reference_unit: Option<Decimal>,
    pub pack_unit: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub shipping_free: bool,
    pub shipping_time: Option<String>,
}

impl FromFields for VariantData {
    fn from_fields(f: &FieldSet) -> Result<Self, HydrationError> {
        let invalid = |source| HydrationError::Invalid {
            entity: f.entity().to_string(),
            source,
        };
        let id = VariantId::new(f.required_i64("id")?).map_err(invalid)?;
        let number = OrderNumber::new(f.required_string("ordernumber")?).map_err(invalid)?;

        Ok(Self {
            id,
            number,
            supplier_number: f.optional_string("suppliernumber")?,
            kind: f.optional_i64("kind")?.unwrap_or(1),
            additional_text: f.optional_string("additionaltext")?,
            impressions: f.optional_i64("impressions")?.unwrap_or(0),
            sales: f.optional_i64("sales")?.unwrap_or(0),
            active: f.required_bool("active")?,
            in_stock: f.optional_i64("instock")?,
            stock_min: f.optional_i64("stockmin")?,
            weight: f.optional_decimal("weight")?,
            position: f.optional_i64("position")?.unwrap_or(0),
            width: f.optional_decimal("width")?,
            height: f.optional_decimal("height")?,
            length: f.optional_decimal("length")?,
            ean: f.optional_string("ean")?,
            unit_id: f.optional_i64("unitID")?,
            purchase_steps: f.optional_i64("purchasesteps")?,
            max_purchase: f.optional_i64("maxpurchase")?,
            min_purchase: f.optional_i64("minpurchase")?,
            purchase_unit: f.optional_decimal("purchaseunit")?,
            reference_unit: f.optional_decimal("referenceunit")?,
            pack_unit: f.optional_string("packunit")?,
            release_date: f.optional_date("releasedate")?,
            shipping_free: f.required_bool("shippingfree")?,
            shipping_time: f.optional_string("shippingtime")?,
        })
    }
}

/// A reduced product projection suitable for listings and sliders.
///
/// Product and variant data are always present (mandatory joins). Every other
/// relation is either fully present or `None`, never partially populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductMini {
    pub product: ProductData,
    pub variant: VariantData,
    pub tax: Option<Tax>,
    pub unit: Option<Unit>,
    pub manufacturer: Option<Manufacturer>,
    pub price_group: Option<PriceGroup>,
    /// Variant attribute columns (`s_articles_attributes`).
    pub attributes: AttributeBag,
}

impl ProductMini {
    pub fn new(product: ProductData, variant: VariantData) -> Self {
        Self {
            product,
            variant,
            tax: None,
            unit: None,
            manufacturer: None,
            price_group: None,
            attributes: AttributeBag::new(),
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    pub fn variant_id(&self) -> VariantId {
        self.variant.id
    }

    pub fn number(&self) -> &OrderNumber {
        &self.variant.number
    }
}

impl Entity for ProductMini {
    type Id = VariantId;

    fn id(&self) -> &Self::Id {
        &self.variant.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::Scalar;

    fn product_fields() -> FieldSet {
        let mut f = FieldSet::new("product");
        f.insert("id", Scalar::Int(2));
        f.insert("supplierID", Scalar::Int(5));
        f.insert("name", Scalar::Text("Sonnenbrille".into()));
        f.insert("active", Scalar::Int(1));
        f.insert("taxID", Scalar::Int(1));
        f.insert("topseller", Scalar::Int(0));
        f.insert("pricegroupID", Scalar::Null);
        f.insert("pricegroupActive", Scalar::Bool(false));
        f.insert("laststock", Scalar::Int(0));
        f.insert("crossbundlelook", Scalar::Int(0));
        f.insert("notification", Scalar::Int(0));
        f.insert(
            "datum",
            Scalar::Date(NaiveDate::from_ymd_opt(2012, 8, 15).unwrap()),
        );
        f
    }

    fn variant_fields() -> FieldSet {
        let mut f = FieldSet::new("variant");
        f.insert("id", Scalar::Int(11));
        f.insert("ordernumber", Scalar::Text("SW1000".into()));
        f.insert("active", Scalar::Int(1));
        f.insert("unitID", Scalar::Null);
        f.insert("weight", Scalar::Decimal(Decimal::new(250, 3)));
        f.insert("shippingfree", Scalar::Bool(false));
        f
    }

    #[test]
    fn product_data_from_fields() {
        let product = ProductData::from_fields(&product_fields()).unwrap();
        assert_eq!(product.id.get(), 2);
        assert_eq!(product.manufacturer_id, Some(5));
        assert_eq!(product.price_group_id, None);
        assert!(product.active);
        assert!(!product.price_group_active);
        assert_eq!(product.created_at, NaiveDate::from_ymd_opt(2012, 8, 15));
        assert_eq!(product.pseudo_sales, 0);
    }

    #[test]
    fn variant_data_from_fields() {
        let variant = VariantData::from_fields(&variant_fields()).unwrap();
        assert_eq!(variant.id.get(), 11);
        assert_eq!(variant.number.as_str(), "SW1000");
        assert_eq!(variant.unit_id, None);
        assert_eq!(variant.weight, Some(Decimal::new(250, 3)));
        assert_eq!(variant.kind, 1);
    }

    #[test]
    fn blank_order_number_is_invalid() {
        let mut fields = variant_fields();
        fields.insert("ordernumber", Scalar::Text("  ".into()));

        let err = VariantData::from_fields(&fields).unwrap_err();
        assert!(matches!(err, HydrationError::Invalid { .. }));
    }

    #[test]
    fn mini_identity_is_the_variant() {
        let product = ProductData::from_fields(&product_fields()).unwrap();
        let variant = VariantData::from_fields(&variant_fields()).unwrap();
        let mini = ProductMini::new(product, variant);

        assert_eq!(mini.id().get(), 11);
        assert_eq!(mini.product_id().get(), 2);
        assert_eq!(mini.number().as_str(), "SW1000");
        assert!(mini.tax.is_none());

        let mut other = mini.clone();
        other.attributes = AttributeBag::new();
        other.product.name = "Renamed".into();
        assert!(mini.same_identity(&other));
    }

    #[test]
    fn mini_serializes_absent_relations_as_null() {
        let product = ProductData::from_fields(&product_fields()).unwrap();
        let variant = VariantData::from_fields(&variant_fields()).unwrap();
        let mini = ProductMini::new(product, variant);

        let json = serde_json::to_value(&mini).unwrap();
        assert!(json["unit"].is_null());
        assert_eq!(json["variant"]["number"], "SW1000");
        assert_eq!(json["attributes"], serde_json::json!({}));
    }
}
