//! Static catalog of client-side error codes.
//!
//! Every pre-flight failure raised by this crate carries one of the
//! `SE00xx` codes below together with its human-readable message. The
//! table is read-only and shared process-wide.
//!
//! Arbitrary code strings (for example codes echoed back by an integrator)
//! can be resolved with [`lookup`], which never fails.

use std::fmt;
use std::str::FromStr;

/// Message returned by [`lookup`] for codes that are not in the catalog.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// A single `(code, message)` row of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorEntry {
    /// Symbolic code, e.g. `"SE0003"`.
    pub code: &'static str,
    /// Human-readable message.
    pub message: &'static str,
}

macro_rules! catalog {
    ($($(#[$meta:meta])* $variant:ident => ($code:literal, $message:expr)),+ $(,)?) => {
        /// Symbolic error codes known to the catalog.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum CatalogCode {
            $($(#[$meta])* $variant,)+
        }

        impl CatalogCode {
            /// Every catalog code, in code order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Returns the wire code, e.g. `"SE0003"`.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Returns the human-readable message for this code.
            #[must_use]
            pub const fn message(self) -> &'static str {
                match self {
                    $(Self::$variant => $message,)+
                }
            }
        }

        impl FromStr for CatalogCode {
            type Err = UnknownCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok(Self::$variant),)+
                    other => Err(UnknownCode(other.to_owned())),
                }
            }
        }
    };
}

catalog! {
    /// Expiry is not in `DD-MM-YYYY hh:mm:ss` form.
    ExpireOnFormat => ("SE0001", "The expiration date and time must be in the format: DD-MM-YYYY hh:mm:ss."),
    /// Amount is not numeric or not strictly positive.
    AmountNotPositive => ("SE0002", "The amount must be a positive number."),
    /// Title is blank.
    TitleRequired => ("SE0003", "The title field cannot be left blank or empty."),
    /// Payment description is longer than 1000 characters.
    PaymentDescriptionTooLong => ("SE0004", "The payment description cannot exceed 1000 characters."),
    /// Callback parameters were supplied empty.
    CallbackParametersMissing => ("SE0005", "The callback parameters are missing required fields, such as the API URL and reference number."),
    /// Refund order id is blank.
    OrderIdRequired => ("SE0006", "The order ID is required and must be a valid identifier (a non-empty string)."),
    /// Refund remarks are longer than 200 characters.
    RemarksTooLong => ("SE0007", "Remarks cannot exceed 200 characters in length."),
    /// Transaction id is blank.
    TransactionIdRequired => ("SE0008", "The transaction ID is required and must be a valid identifier (a non-empty string)."),
    /// Invoice number is longer than 50 characters.
    InvoiceNumberTooLong => ("SE0009", "The invoice number should not exceed 50 characters if provided."),
    /// Customer first name is blank.
    FirstNameRequired => ("SE0010", "Customer first name field cannot be left blank or empty."),
    /// Customer last name is blank.
    LastNameRequired => ("SE0011", "Customer last name field cannot be left blank or empty."),
    /// Customer phone is not 10 to 15 digits.
    PhoneInvalid => ("SE0012", "Customer phone must be a valid number with 10 to 15 digits."),
    /// Customer email is malformed.
    EmailInvalid => ("SE0013", "Customer email must be a valid email address."),
    /// Callback URL is malformed.
    CallbackUrlInvalid => ("SE0014", "Callback API URL must be a valid URL."),
    /// Reference id is blank.
    ReferenceIdRequired => ("SE0015", "The reference ID is required and must be a valid identifier (a non-empty string)."),
    /// Payment link request carries no fields.
    PaymentLinkRequestMissing => ("SE0016", "Missing the required parameter $data when calling createPaymentLink."),
    /// QR code request carries no fields.
    PaymentQrCodeRequestMissing => ("SE0017", "Missing the required parameter $data when calling createPaymentQRCode."),
    /// Amount is blank.
    AmountRequired => ("SE0018", "Amount Mandatory."),
    /// Title is longer than 50 characters.
    TitleTooLong => ("SE0019", "Title should be less than 50 characters."),
    /// Title contains characters outside `[a-zA-Z0-9 ]`.
    TitleSpecialCharacters => ("SE0020", "Title should not contain special characters."),
    /// Short description is longer than 1000 characters.
    ShortDescriptionTooLong => ("SE0021", "Description should be less than 1000 characters."),
    /// Short description contains special characters.
    ShortDescriptionSpecialCharacters => ("SE0022", "Description should not contain special characters."),
    /// Payment description contains special characters.
    PaymentDescriptionSpecialCharacters => ("SE0023", "Payment Description should not contain special characters."),
    /// Expiry lies in the past.
    ExpireOnInPast => ("SE0024", "Expire on should not be past date."),
    /// Invoice number contains special characters.
    InvoiceNumberSpecialCharacters => ("SE0025", "Invoice number should not contain special characters."),
    /// Customer email is longer than 320 characters.
    EmailTooLong => ("SE0026", "Email cannot be more than 320 characters."),
    /// Customer email is blank.
    EmailRequired => ("SE0027", "Email is mandatory. Cannot be empty."),
    /// Customer phone is blank.
    PhoneRequired => ("SE0028", "Phone is mandatory. Cannot be empty."),
    /// Callback reference number is longer than 50 characters.
    ReferenceNoTooLong => ("SE0029", "ReferenceNo should be less than 50 characters."),
    /// Callback URL is longer than 2048 characters.
    CallbackUrlTooLong => ("SE0030", "URL should be less than 2048 characters."),
    /// Callback URL is blank.
    CallbackUrlRequired => ("SE0031", "URL is Mandatory. Cannot be empty."),
    /// Customer list is empty or malformed.
    CustomersInvalid => ("SE0032", concat!(
        "The customer details must be an array containing valid information such as first name,",
        "last name, phone, and email.",
    )),
    /// Settings are empty or not a map.
    SettingsInvalid => ("SE0033", "The Settings must be an array containing valid information such as displaySummary."),
    /// Customer first name is not name-shaped.
    FirstNameInvalid => ("SE0034", "Customer first name must be a valid name."),
    /// Customer last name is not name-shaped.
    LastNameInvalid => ("SE0035", "Customer last name must be a valid name."),
}

impl CatalogCode {
    /// Returns this code as a catalog row.
    #[must_use]
    pub const fn entry(self) -> ErrorEntry {
        ErrorEntry {
            code: self.as_str(),
            message: self.message(),
        }
    }
}

impl fmt::Display for CatalogCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A code string that is not present in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code: {0}")]
pub struct UnknownCode(pub String);

/// Resolves a code string to its message.
///
/// Unknown codes resolve to [`UNKNOWN_ERROR_MESSAGE`].
#[must_use]
pub fn lookup(code: &str) -> &'static str {
    code.parse::<CatalogCode>()
        .map_or(UNKNOWN_ERROR_MESSAGE, CatalogCode::message)
}
