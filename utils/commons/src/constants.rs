/// Tag for the custom Payment event.
pub const PAYMENT_EVENT_TAG: u8 = u8::MAX - 5;

/// First and only byte of auxiliary payment data that requests a mint
/// regardless of the supply cap.
pub const MINT_DIRECTIVE_TAG: u8 = 1;

/// Extension appended to generated token image URLs.
pub const IMAGE_URL_EXTENSION: &str = ".png";

/// Description assigned to newly minted tokens.
pub const TOKEN_DESCRIPTION_PLACEHOLDER: &str = "Description Placeholder";
