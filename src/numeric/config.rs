use std::fmt;
use std::sync::Arc;

pub type Handler<N, X, T> = Arc<dyn Fn(N) -> Result<T, X> + Send + Sync>;

/// Tells [`parse_number`](super::parse_number) what to do with each literal form.
///
/// Every callback either produces a value or rejects the literal with a
/// problem. `expecting` is reported when no digits are found at all and
/// `invalid` when a literal is malformed.
pub struct NumberConfig<X, T> {
    pub int: Handler<i64, X, T>,
    pub hex: Handler<i64, X, T>,
    pub octal: Handler<i64, X, T>,
    pub binary: Handler<i64, X, T>,
    pub float: Handler<f64, X, T>,
    pub invalid: X,
    pub expecting: X,
}

/// Classification of a numeric literal, as produced by [`NumberConfig::literal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Int(i64),
    Hex(i64),
    Octal(i64),
    Binary(i64),
    Float(f64),
}

fn reject<N, X, T>(problem: X) -> Handler<N, X, T>
where
    X: Clone + Send + Sync + 'static,
{
    Arc::new(move |_| Err(problem.clone()))
}

impl<X, T> NumberConfig<X, T>
where
    X: Clone + Send + Sync + 'static,
    T: 'static,
{
    /// A configuration that rejects every form with `invalid`.
    pub fn new(expecting: X, invalid: X) -> Self {
        Self {
            int: reject(invalid.clone()),
            hex: reject(invalid.clone()),
            octal: reject(invalid.clone()),
            binary: reject(invalid.clone()),
            float: reject(invalid.clone()),
            invalid,
            expecting,
        }
    }

    pub fn on_int(mut self, f: impl Fn(i64) -> Result<T, X> + Send + Sync + 'static) -> Self {
        self.int = Arc::new(f);
        self
    }

    pub fn on_hex(mut self, f: impl Fn(i64) -> Result<T, X> + Send + Sync + 'static) -> Self {
        self.hex = Arc::new(f);
        self
    }

    pub fn on_octal(mut self, f: impl Fn(i64) -> Result<T, X> + Send + Sync + 'static) -> Self {
        self.octal = Arc::new(f);
        self
    }

    pub fn on_binary(mut self, f: impl Fn(i64) -> Result<T, X> + Send + Sync + 'static) -> Self {
        self.binary = Arc::new(f);
        self
    }

    pub fn on_float(mut self, f: impl Fn(f64) -> Result<T, X> + Send + Sync + 'static) -> Self {
        self.float = Arc::new(f);
        self
    }

    /// Post-processes every successful value.
    pub fn map<U>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> NumberConfig<X, U>
    where
        U: 'static,
    {
        let f = Arc::new(f);
        NumberConfig {
            int: compose(self.int, Arc::clone(&f)),
            hex: compose(self.hex, Arc::clone(&f)),
            octal: compose(self.octal, Arc::clone(&f)),
            binary: compose(self.binary, Arc::clone(&f)),
            float: compose(self.float, f),
            invalid: self.invalid,
            expecting: self.expecting,
        }
    }
}

fn compose<N, X, T, U, F>(handler: Handler<N, X, T>, f: Arc<F>) -> Handler<N, X, U>
where
    N: 'static,
    X: 'static,
    T: 'static,
    U: 'static,
    F: Fn(T) -> U + Send + Sync + 'static + ?Sized,
{
    Arc::new(move |n| handler(n).map(|value| f(value)))
}

impl<X> NumberConfig<X, i64>
where
    X: Clone + Send + Sync + 'static,
{
    /// Plain decimal integers; prefixed and floating literals are `invalid`.
    pub fn int(expecting: X, invalid: X) -> Self {
        Self::new(expecting, invalid).on_int(Ok)
    }
}

impl<X> NumberConfig<X, f64>
where
    X: Clone + Send + Sync + 'static,
{
    /// Decimal and floating literals, with integers widened to floats.
    pub fn float(expecting: X, invalid: X) -> Self {
        Self::new(expecting, invalid)
            .on_int(|n| Ok(n as f64))
            .on_float(Ok)
    }
}

impl<X> NumberConfig<X, Literal>
where
    X: Clone + Send + Sync + 'static,
{
    /// Accepts every form and reports which one was found.
    pub fn literal(expecting: X, invalid: X) -> Self {
        Self::new(expecting, invalid)
            .on_int(|n| Ok(Literal::Int(n)))
            .on_hex(|n| Ok(Literal::Hex(n)))
            .on_octal(|n| Ok(Literal::Octal(n)))
            .on_binary(|n| Ok(Literal::Binary(n)))
            .on_float(|n| Ok(Literal::Float(n)))
    }
}

impl<X: Clone, T> Clone for NumberConfig<X, T> {
    fn clone(&self) -> Self {
        Self {
            int: Arc::clone(&self.int),
            hex: Arc::clone(&self.hex),
            octal: Arc::clone(&self.octal),
            binary: Arc::clone(&self.binary),
            float: Arc::clone(&self.float),
            invalid: self.invalid.clone(),
            expecting: self.expecting.clone(),
        }
    }
}

impl<X: fmt::Debug, T> fmt::Debug for NumberConfig<X, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberConfig")
            .field("invalid", &self.invalid)
            .field("expecting", &self.expecting)
            .finish_non_exhaustive()
    }
}
