//! Named candidate model specifications.
//!
//! Candidates are configuration, not fitted models: the analyst supplies a
//! handful of plausible specifications and the evaluation step reports
//! machine-comparable metrics for each. Which family to consider in the
//! first place stays a human decision.

use std::fmt;

/// SARIMA order (p, d, q)(P, D, Q)[s].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SarimaOrder {
    /// Non-seasonal AR order.
    pub p: usize,
    /// Non-seasonal differencing order.
    pub d: usize,
    /// Non-seasonal MA order.
    pub q: usize,
    /// Seasonal AR order.
    pub cap_p: usize,
    /// Seasonal differencing order.
    pub cap_d: usize,
    /// Seasonal MA order.
    pub cap_q: usize,
    /// Seasonal period.
    pub s: usize,
}

impl SarimaOrder {
    /// A non-seasonal ARIMA(p, d, q) order.
    pub fn nonseasonal(p: usize, d: usize, q: usize) -> Self {
        Self {
            p,
            d,
            q,
            cap_p: 0,
            cap_d: 0,
            cap_q: 0,
            s: 0,
        }
    }

    /// A full seasonal order.
    pub fn seasonal(
        p: usize,
        d: usize,
        q: usize,
        cap_p: usize,
        cap_d: usize,
        cap_q: usize,
        s: usize,
    ) -> Self {
        Self {
            p,
            d,
            q,
            cap_p,
            cap_d,
            cap_q,
            s,
        }
    }

    /// Check if any seasonal component is active.
    pub fn is_seasonal(&self) -> bool {
        self.s > 1 && (self.cap_p > 0 || self.cap_d > 0 || self.cap_q > 0)
    }

    /// Number of estimated coefficients (AR + MA + seasonal AR + seasonal MA
    /// + intercept).
    pub fn num_params(&self) -> usize {
        self.p + self.q + self.cap_p + self.cap_q + 1
    }
}

impl fmt::Display for SarimaOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_seasonal() {
            write!(
                f,
                "SARIMA({},{},{})({},{},{})[{}]",
                self.p, self.d, self.q, self.cap_p, self.cap_d, self.cap_q, self.s
            )
        } else {
            write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)
        }
    }
}

/// Error component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorComponent {
    #[default]
    Additive,
    Multiplicative,
}

/// Trend component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendComponent {
    #[default]
    None,
    Additive,
    AdditiveDamped,
}

/// Seasonal component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonalComponent {
    #[default]
    None,
    Additive,
    Multiplicative,
}

/// ETS component selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EtsComponents {
    pub error: ErrorComponent,
    pub trend: TrendComponent,
    pub seasonal: SeasonalComponent,
    /// Seasonal period; ignored when `seasonal` is `None`.
    pub period: usize,
}

impl EtsComponents {
    /// Create a component selection.
    pub fn new(
        error: ErrorComponent,
        trend: TrendComponent,
        seasonal: SeasonalComponent,
        period: usize,
    ) -> Self {
        Self {
            error,
            trend,
            seasonal,
            period,
        }
    }

    /// ETS(A,N,N) - simple exponential smoothing.
    pub fn ann() -> Self {
        Self::new(
            ErrorComponent::Additive,
            TrendComponent::None,
            SeasonalComponent::None,
            0,
        )
    }

    /// ETS(A,A,N) - Holt's linear method.
    pub fn aan() -> Self {
        Self::new(
            ErrorComponent::Additive,
            TrendComponent::Additive,
            SeasonalComponent::None,
            0,
        )
    }

    /// ETS(A,A,A) - additive Holt-Winters with the given period.
    pub fn aaa(period: usize) -> Self {
        Self::new(
            ErrorComponent::Additive,
            TrendComponent::Additive,
            SeasonalComponent::Additive,
            period,
        )
    }

    /// Check if a trend component is active.
    pub fn has_trend(&self) -> bool {
        !matches!(self.trend, TrendComponent::None)
    }

    /// Check if a seasonal component is active.
    pub fn has_seasonal(&self) -> bool {
        !matches!(self.seasonal, SeasonalComponent::None)
    }
}

impl fmt::Display for EtsComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = match self.error {
            ErrorComponent::Additive => "A",
            ErrorComponent::Multiplicative => "M",
        };
        let t = match self.trend {
            TrendComponent::None => "N",
            TrendComponent::Additive => "A",
            TrendComponent::AdditiveDamped => "Ad",
        };
        let s = match self.seasonal {
            SeasonalComponent::None => "N",
            SeasonalComponent::Additive => "A",
            SeasonalComponent::Multiplicative => "M",
        };
        write!(f, "ETS({},{},{})", e, t, s)
    }
}

/// A model specification from one of the supported families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSpec {
    Sarima(SarimaOrder),
    Ets(EtsComponents),
}

impl CandidateSpec {
    /// Number of estimated parameters, used for residual-test degrees of
    /// freedom. ETS counts one smoothing parameter per active component.
    pub fn num_params(&self) -> usize {
        match self {
            CandidateSpec::Sarima(order) => order.num_params(),
            CandidateSpec::Ets(c) => {
                1 + usize::from(c.has_trend()) + usize::from(c.has_seasonal())
            }
        }
    }
}

impl fmt::Display for CandidateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateSpec::Sarima(order) => write!(f, "{order}"),
            CandidateSpec::Ets(components) => write!(f, "{components}"),
        }
    }
}

/// A named candidate handed to a model engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Display name; defaults to the specification's notation.
    pub name: String,
    pub spec: CandidateSpec,
}

impl Candidate {
    /// Candidate from a SARIMA order, named by its notation.
    pub fn sarima(order: SarimaOrder) -> Self {
        Self {
            name: order.to_string(),
            spec: CandidateSpec::Sarima(order),
        }
    }

    /// Candidate from ETS components, named by their notation.
    pub fn ets(components: EtsComponents) -> Self {
        Self {
            name: components.to_string(),
            spec: CandidateSpec::Ets(components),
        }
    }

    /// Candidate with an explicit name.
    pub fn named(name: impl Into<String>, spec: CandidateSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }
}
