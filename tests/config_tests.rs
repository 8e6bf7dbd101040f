mod support;

use rust_decimal_macros::dec;

use tradeloom::config::{Config, LoadOptions, CROSS_EXCHANGE_STRATEGIES, EXCHANGE_STRATEGIES};
use tradeloom::error::{ConfigError, Error};
use tradeloom::strategy::Registries;

use support::config::write_temp_config;
use support::strategies::{registries, single_only, Grid};

const FULL_CONFIG: &str = r#"
# bot configuration
imports:
- github.com/example/strategies/grid

notifications:
  slack:
    defaultChannel: dev-bot
    errorChannel: bot-error
  symbolChannels:
    "^BTC": btc
  sessionChannels:
    max: bot-max
  routing:
    trade: $symbol
    order: $session
    pnL: bot-pnl

sessions:
  max:
    exchange: max
    envVarPrefix: MAX
  binance:
    exchange: binance
    envVarPrefix: BINANCE

riskControls:
  sessionBased:
    max:
      orderExecutor:
        bySymbol:
          BTCUSDT:
            maxOrderAmount: 100

backtest:
  startTime: "2022-01-01"
  endTime: "2022-03-31"
  symbols:
  - BTCUSDT
  account:
    makerCommission: 15
    takerCommission: 15
    balances:
      BTC: 0.5
      USDT: 10000

reportPnL:
- averageCostBySymbols:
  - BTCUSDT
  of: binance
  when:
  - "@daily"

exchangeStrategies:
- on: max
  grid:
    symbol: BTCUSDT
    gridNumber: 50
    upperPrice: 45000
    lowerPrice: 30000.5
- on: [binance, max]
  grid:
    symbol: ETHUSDT
    gridNumber: 20
    upperPrice: 4000
    lowerPrice: 2500
    long: true

crossExchangeStrategies:
- xmaker:
    symbol: BTCUSDT
    sourceExchange: binance
    makerExchange: max
    margin: 0.003
"#;

#[test]
fn config_loads_full_document() {
    let file = write_temp_config(FULL_CONFIG);
    let config = Config::load(file.path(), &registries()).unwrap();

    assert_eq!(config.imports, vec!["github.com/example/strategies/grid"]);
    assert_eq!(config.sessions.len(), 2);
    assert_eq!(config.session("binance").unwrap().env_var_prefix, "BINANCE");

    let backtest = config.backtest.as_ref().unwrap();
    assert_eq!(backtest.start_date().unwrap().to_string(), "2022-01-01");
    assert_eq!(backtest.account.balance_map()["BTC"].available, dec!(0.5));

    let routing = config
        .notifications
        .as_ref()
        .and_then(|n| n.routing.as_ref())
        .unwrap();
    assert_eq!(routing.pnl.as_deref(), Some("bot-pnl"));

    assert_eq!(config.pnl_reporters[0].when.as_slice(), ["@daily"]);
    assert!(config
        .risk_controls
        .as_ref()
        .unwrap()
        .get("sessionBased")
        .is_some());

    assert_eq!(config.exchange_strategies.len(), 2);
    let first = config.exchange_strategies[0].downcast_ref::<Grid>().unwrap();
    assert_eq!(first.symbol, "BTCUSDT");
    assert_eq!(first.lower_price, dec!(30000.5));
    assert_eq!(config.exchange_strategies[1].mounts, vec!["binance", "max"]);

    assert_eq!(config.strategies_on("max").count(), 2);
    assert_eq!(config.strategies_on("binance").count(), 1);

    assert_eq!(config.cross_exchange_strategies.len(), 1);
    assert_eq!(config.cross_exchange_strategies[0].id(), "xmaker");
}

#[test]
fn config_without_strategy_sections_needs_no_registrations() {
    let file = write_temp_config(
        r#"
sessions:
  max:
    exchange: max
"#,
    );

    let config = Config::load(file.path(), &Registries::new()).unwrap();

    assert_eq!(config.sessions.len(), 1);
    assert!(config.exchange_strategies.is_empty());
    assert!(config.cross_exchange_strategies.is_empty());
}

#[test]
fn config_reports_missing_file() {
    let result = Config::load("/nonexistent/tradeloom.yaml", &registries());

    assert!(
        matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))),
        "Expected missing file to be reported"
    );
}

#[test]
fn config_rejects_malformed_yaml() {
    let file = write_temp_config("sessions:\n  max: [exchange: max\n");
    let result = Config::load(file.path(), &registries());

    assert!(
        matches!(result, Err(Error::Config(ConfigError::MalformedDocument(_)))),
        "Expected malformed document error"
    );
}

#[test]
fn config_rejects_session_without_exchange() {
    let file = write_temp_config(
        r#"
sessions:
  binance:
    envVarPrefix: BINANCE
"#,
    );

    match Config::load(file.path(), &registries()) {
        Err(Error::Config(ConfigError::SchemaDecode { path, .. })) => {
            assert_eq!(path, "sessions.binance");
        }
        Err(err) => panic!("Expected schema decode error, got {err}"),
        Ok(_) => panic!("Expected session without exchange to be rejected"),
    }
}

#[test]
fn partial_backtest_block_loads() {
    let file = write_temp_config(
        r#"
backtest:
  startTime: "01/02/2022"
  symbols: [BTCUSDT]
"#,
    );

    let config = Config::load(file.path(), &registries()).unwrap();
    let backtest = config.backtest.unwrap();

    match backtest.start_date() {
        Err(ConfigError::InvalidValue { field, .. }) => {
            assert_eq!(field, "backtest.startTime");
        }
        other => panic!("Expected invalid date error, got {other:?}"),
    }
    assert!(matches!(
        backtest.end_date(),
        Err(ConfigError::MissingField {
            field: "backtest.endTime"
        })
    ));
}

#[test]
fn blank_session_exchange_is_kept() {
    let file = write_temp_config(
        r#"
sessions:
  max:
    exchange: ""
"#,
    );

    let config = Config::load(file.path(), &registries()).unwrap();

    assert_eq!(config.session("max").unwrap().exchange, "");
}

#[test]
fn schema_error_names_nested_field() {
    let file = write_temp_config(
        r#"
backtest:
  startTime: "2022-01-01"
  endTime: "2022-03-31"
  account:
    makerCommission: lots
"#,
    );

    match Config::load(file.path(), &registries()) {
        Err(Error::Config(ConfigError::SchemaDecode { path, source })) => {
            assert_eq!(path, "backtest.account.makerCommission");
            assert!(source.to_string().contains("lots"));
        }
        Err(err) => panic!("Expected schema decode error, got {err}"),
        Ok(_) => panic!("Expected bad commission to be rejected"),
    }
}

#[test]
fn schema_error_names_list_index() {
    let file = write_temp_config(
        r#"
reportPnL:
- of: binance
- when:
    a: 1
"#,
    );

    match Config::load(file.path(), &registries()) {
        Err(Error::Config(ConfigError::SchemaDecode { path, source })) => {
            assert_eq!(path, "reportPnL[1].when");
            assert!(source
                .to_string()
                .contains("expected a string or a list of strings"));
        }
        Err(err) => panic!("Expected schema decode error, got {err}"),
        Ok(_) => panic!("Expected bad report schedule to be rejected"),
    }
}

#[test]
fn strategy_section_must_be_a_list() {
    let file = write_temp_config(
        r#"
exchangeStrategies:
  grid:
    symbol: BTCUSDT
"#,
    );

    match Config::load(file.path(), &registries()) {
        Err(Error::Config(ConfigError::MalformedSection { section, found })) => {
            assert_eq!(section, EXCHANGE_STRATEGIES);
            assert_eq!(found, "mapping");
        }
        Err(err) => panic!("Expected malformed section error, got {err}"),
        Ok(_) => panic!("Expected non-list section to be rejected"),
    }
}

#[test]
fn strategy_entry_must_be_a_mapping() {
    let file = write_temp_config(
        r#"
exchangeStrategies:
- grid
"#,
    );

    match Config::load(file.path(), &registries()) {
        Err(Error::Config(ConfigError::MalformedEntry {
            section,
            index,
            found,
        })) => {
            assert_eq!(section, EXCHANGE_STRATEGIES);
            assert_eq!(index, 0);
            assert_eq!(found, "string");
        }
        Err(err) => panic!("Expected malformed entry error, got {err}"),
        Ok(_) => panic!("Expected non-mapping entry to be rejected"),
    }
}

#[test]
fn cross_exchange_section_without_registrations_fails() {
    let file = write_temp_config(
        r#"
crossExchangeStrategies:
- xmaker:
    symbol: BTCUSDT
"#,
    );

    assert!(matches!(
        Config::load(file.path(), &single_only()),
        Err(Error::Config(ConfigError::NoExtensionsRegistered {
            section: CROSS_EXCHANGE_STRATEGIES
        }))
    ));
}

#[test]
fn preload_skips_strategy_sections() {
    let file = write_temp_config(FULL_CONFIG);

    let config = Config::preload(file.path()).unwrap();

    assert_eq!(config.sessions.len(), 2);
    assert_eq!(config.imports.len(), 1);
    assert!(config.exchange_strategies.is_empty());
    assert!(config.cross_exchange_strategies.is_empty());
}

#[test]
fn strict_load_rejects_misspelled_strategy() {
    let file = write_temp_config(
        r#"
exchangeStrategies:
- on: max
  gird:
    symbol: BTCUSDT
"#,
    );

    let lenient = Config::load(file.path(), &registries()).unwrap();
    assert!(lenient.exchange_strategies.is_empty());

    match Config::load_with(file.path(), &registries(), LoadOptions::strict()) {
        Err(Error::Config(ConfigError::UnknownStrategy { id, index, .. })) => {
            assert_eq!(id, "gird");
            assert_eq!(index, 0);
        }
        Err(err) => panic!("Expected unknown strategy error, got {err}"),
        Ok(_) => panic!("Expected misspelled strategy to be rejected"),
    }
}

#[test]
fn loading_twice_yields_identical_results() {
    let file = write_temp_config(FULL_CONFIG);
    let registries = registries();

    let first = Config::load(file.path(), &registries).unwrap();
    let second = Config::load(file.path(), &registries).unwrap();

    let grids = |config: &Config| -> Vec<Grid> {
        config
            .exchange_strategies
            .iter()
            .filter_map(|mount| mount.downcast_ref::<Grid>().cloned())
            .collect()
    };
    assert_eq!(grids(&first), grids(&second));
    assert_eq!(first.sessions, second.sessions);
}
