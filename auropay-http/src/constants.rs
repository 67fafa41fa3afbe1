//! HTTP-specific constants for the Auropay gateway.

/// Header carrying the merchant access key.
pub const ACCESS_KEY_HEADER: &str = "x-access-key";

/// Header carrying the merchant secret key.
pub const SECRET_KEY_HEADER: &str = "x-secret-key";

/// Header carrying the API version of the called operation.
pub const VERSION_HEADER: &str = "x-version";

/// Media type of every request body.
pub const APPLICATION_JSON: &str = "application/json";

/// Message reported for an error status whose body has no usable `message`.
pub const DEFAULT_STATUS_MESSAGE: &str = "Not Found";

/// Key injected into payment-link and QR-code payloads.
pub const RESPONSE_TYPE_KEY: &str = "ResponseType";

/// Key injected into payment-link and QR-code payloads.
pub const ENABLE_PROTECTION_KEY: &str = "enableProtection";

/// Key injected into refund payloads.
pub const USER_TYPE_KEY: &str = "UserType";
