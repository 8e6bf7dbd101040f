use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tradeloom::strategy::{CrossExchangeStrategy, Registries, SingleExchangeStrategy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Foo {
    pub bar: i64,
}

impl SingleExchangeStrategy for Foo {
    fn id(&self) -> &str {
        "foo"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub symbol: String,
    pub grid_number: u32,
    pub upper_price: Decimal,
    pub lower_price: Decimal,
    #[serde(default)]
    pub long: bool,
}

impl SingleExchangeStrategy for Grid {
    fn id(&self) -> &str {
        "grid"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossMaker {
    pub symbol: String,
    pub source_exchange: String,
    pub maker_exchange: String,
    pub margin: Decimal,
}

impl CrossExchangeStrategy for CrossMaker {
    fn id(&self) -> &str {
        "xmaker"
    }
}

/// Registries with every test strategy registered.
pub fn registries() -> Registries {
    let mut registries = Registries::new();
    registries.single.register::<Foo>("foo");
    registries.single.register::<Grid>("grid");
    registries.cross.register::<CrossMaker>("xmaker");
    registries
}

/// Registries with only the single-exchange strategies.
pub fn single_only() -> Registries {
    let mut registries = Registries::new();
    registries.single.register::<Foo>("foo");
    registries.single.register::<Grid>("grid");
    registries
}
