use super::{Parser, Shared};
use crate::numeric::{NumberConfig, parse_number};

pub fn number<C, X, T>(config: NumberConfig<X, T>) -> Parser<C, X, T>
where
    C: 'static,
    X: Shared,
    T: 'static,
{
    Parser::new(move |state| parse_number(state, &config))
}

/// Decimal integers only. Prefixed and floating literals are `invalid`.
pub fn int<C, X>(expecting: X, invalid: X) -> Parser<C, X, i64>
where
    C: 'static,
    X: Shared,
{
    number(NumberConfig::int(expecting, invalid))
}

/// Decimal and floating literals; integers are widened.
pub fn float<C, X>(expecting: X, invalid: X) -> Parser<C, X, f64>
where
    C: 'static,
    X: Shared,
{
    number(NumberConfig::float(expecting, invalid))
}
