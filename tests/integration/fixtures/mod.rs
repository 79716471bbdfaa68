// Test fixtures with known document pairs and expected outputs
// WHY: Golden-file testing requires deterministic input/output pairs for validation

#![allow(dead_code)]

/// Original contract text: two paragraphs separated by a blank line
pub const CONTRACT_ORIGINAL: &str = "Budget total: 1,000 USD. The project starts in May.

Staff count is 12. Offices stay open.
";

/// Revised contract: one number edited, last sentence rewritten
pub const CONTRACT_REVISED: &str = "Budget total: 1,250 USD. The project starts in May.

Staff count is 12. A new office opens in June.
";

/// Expected CSV report for the contract pair
pub const CONTRACT_EXPECTED_CSV: &str = "type,sim,original,revised,idxA,idxB
replace,0.92,\"Budget total: 1,000 USD.\",\"Budget total: 1,250 USD. (Δ +250)\",1,1
del,0.00,Offices stay open.,,4,
add,0.00,,A new office opens in June.,,4";

/// Expected highlighted markup for the contract pair
/// WHY: deleted sentences land in their own paragraph after the slots created so far
pub const CONTRACT_EXPECTED_MARKUP: &str = "Budget total: 1,==250== USD. The project starts in May.

Staff count is 12. ++A new office opens in June.++
~~Offices stay open.~~";

/// Korean text with a negative decimal edit
pub const KOREAN_ORIGINAL: &str = "변경 전 값은 -1,234.5 입니다.\n";
pub const KOREAN_REVISED: &str = "변경 후 값은 -1,200.0 입니다.\n";
pub const KOREAN_EXPECTED_REVISED: &str = "변경 후 값은 -1,200.0 입니다. (Δ +34.5)";

/// Same content, differing only in spacing and punctuation
pub const SPACING_ORIGINAL: &str = "Spacing   matters. Quotes, too!\n";
pub const SPACING_REVISED: &str = "Spacing matters. Quotes too!\n";
