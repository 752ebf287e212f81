//! The payment attempt state machine.
//!
//! `AwaitingMethod → MethodSelected → Processing → Succeeded`, with a failed
//! processing step re-arming as `MethodSelected` (same method, so the user
//! retries without reselecting). `Succeeded` is terminal: nothing moves a
//! finished attempt.

use std::fmt;
use std::str::FromStr;

/// Grouping of the offered payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    EWallet,
    BankTransfer,
    CashOnDelivery,
}

/// The fixed set of payment methods the storefront offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Gopay,
    Ovo,
    Dana,
    Shopeepay,
    Bca,
    Mandiri,
    Bni,
    Cod,
}

impl PaymentMethod {
    /// Every offered method, in display order: four e-wallets, three bank
    /// transfers, cash on delivery.
    pub const ALL: [Self; 8] = [
        Self::Gopay,
        Self::Ovo,
        Self::Dana,
        Self::Shopeepay,
        Self::Bca,
        Self::Mandiri,
        Self::Bni,
        Self::Cod,
    ];

    /// Wire code sent to the backend.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Gopay => "gopay",
            Self::Ovo => "ovo",
            Self::Dana => "dana",
            Self::Shopeepay => "shopeepay",
            Self::Bca => "bca",
            Self::Mandiri => "mandiri",
            Self::Bni => "bni",
            Self::Cod => "cod",
        }
    }

    /// User-facing name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Gopay => "GoPay",
            Self::Ovo => "OVO",
            Self::Dana => "DANA",
            Self::Shopeepay => "ShopeePay",
            Self::Bca => "Bank BCA",
            Self::Mandiri => "Bank Mandiri",
            Self::Bni => "Bank BNI",
            Self::Cod => "Cash on Delivery",
        }
    }

    /// Which group the method belongs to.
    #[must_use]
    pub fn kind(self) -> MethodKind {
        match self {
            Self::Gopay | Self::Ovo | Self::Dana | Self::Shopeepay => MethodKind::EWallet,
            Self::Bca | Self::Mandiri | Self::Bni => MethodKind::BankTransfer,
            Self::Cod => MethodKind::CashOnDelivery,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error for unknown payment method codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown payment method: {}", self.0)
    }
}

impl std::error::Error for UnknownMethod {}

impl FromStr for PaymentMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.code() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// What a successful attempt renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub order_id: i64,
    pub amount: f64,
    pub method: PaymentMethod,
}

/// Observable state of a payment attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptState {
    /// No method chosen yet; the pay action is disabled.
    AwaitingMethod,
    /// A method is chosen; the pay action is armed and labeled with it.
    MethodSelected(PaymentMethod),
    /// A submission is in flight; re-entrant submission is rejected.
    Processing(PaymentMethod),
    /// Terminal. The page shows the receipt; nothing else can happen.
    Succeeded(Receipt),
}

/// Reasons an attempt transition was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    /// No method selected yet.
    NoMethodSelected,
    /// A submission is already in flight.
    AlreadyProcessing,
    /// The attempt already succeeded; the state is terminal.
    AlreadySucceeded,
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMethodSelected => f.write_str("no payment method selected"),
            Self::AlreadyProcessing => f.write_str("a payment is already being processed"),
            Self::AlreadySucceeded => f.write_str("the payment already succeeded"),
        }
    }
}

impl std::error::Error for AttemptError {}

/// The attempt state machine.
#[derive(Debug, Clone)]
pub struct Attempt {
    state: AttemptState,
}

impl Default for Attempt {
    fn default() -> Self {
        Self::new()
    }
}

impl Attempt {
    /// Start with no method selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: AttemptState::AwaitingMethod,
        }
    }

    /// Current state, for rendering.
    #[must_use]
    pub fn state(&self) -> &AttemptState {
        &self.state
    }

    /// The currently selected method, if any (also set while processing and
    /// recorded in a receipt).
    #[must_use]
    pub fn selected_method(&self) -> Option<PaymentMethod> {
        match &self.state {
            AttemptState::AwaitingMethod => None,
            AttemptState::MethodSelected(m) | AttemptState::Processing(m) => Some(*m),
            AttemptState::Succeeded(receipt) => Some(receipt.method),
        }
    }

    /// Whether the attempt reached its terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, AttemptState::Succeeded(_))
    }

    /// Whether a submission may start right now.
    #[must_use]
    pub fn ready_to_submit(&self) -> bool {
        matches!(self.state, AttemptState::MethodSelected(_))
    }

    /// Label for the pay action once a method is armed:
    /// `Bayar dengan <method>`.
    #[must_use]
    pub fn pay_label(&self) -> Option<String> {
        match &self.state {
            AttemptState::MethodSelected(m) => Some(format!("Bayar dengan {}", m)),
            _ => None,
        }
    }

    /// Choose a method. Always replaces the previous selection; there is no
    /// multi-select. Refused while processing and after success.
    pub fn select(&mut self, method: PaymentMethod) -> Result<(), AttemptError> {
        match self.state {
            AttemptState::AwaitingMethod | AttemptState::MethodSelected(_) => {
                self.state = AttemptState::MethodSelected(method);
                Ok(())
            }
            AttemptState::Processing(_) => Err(AttemptError::AlreadyProcessing),
            AttemptState::Succeeded(_) => Err(AttemptError::AlreadySucceeded),
        }
    }

    /// Move to `Processing`, returning the method to charge.
    ///
    /// Must be called before the first suspension point of a submission so a
    /// re-entrant submit is refused instead of sent twice.
    pub fn begin_processing(&mut self) -> Result<PaymentMethod, AttemptError> {
        match self.state {
            AttemptState::MethodSelected(m) => {
                self.state = AttemptState::Processing(m);
                Ok(m)
            }
            AttemptState::AwaitingMethod => Err(AttemptError::NoMethodSelected),
            AttemptState::Processing(_) => Err(AttemptError::AlreadyProcessing),
            AttemptState::Succeeded(_) => Err(AttemptError::AlreadySucceeded),
        }
    }

    /// Record a successful charge. Terminal.
    pub fn complete(&mut self, receipt: Receipt) {
        self.state = AttemptState::Succeeded(receipt);
    }

    /// Record a failed charge: the attempt re-arms with the same method so
    /// the user can retry without reselecting.
    pub fn fail(&mut self) {
        if let AttemptState::Processing(m) = self.state {
            self.state = AttemptState::MethodSelected(m);
        }
    }
}
