//! Products read side: the "mini product" listing projection.
//!
//! This crate only describes shapes and how they are built from stripped
//! column sets (no IO, no SQL). Loading lives in `storefront-infra`.

pub mod attributes;
pub mod entities;
pub mod mini;

pub use attributes::AttributeBag;
pub use entities::{Manufacturer, PriceGroup, Tax, Unit};
pub use mini::{ProductData, ProductMini, VariantData};
