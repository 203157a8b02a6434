//! Configuration access port trait.
//!
//! Sections: [data], [analysis], [backtest], [demo]. Typed getters fall back
//! to `default` when a key is missing or unparsable; validation catches the
//! latter before values are read.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
}
