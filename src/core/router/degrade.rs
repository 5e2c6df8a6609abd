//! Canned degraded-tier responses

/// Reply for use cases without a dedicated degradation message
pub const DEFAULT_DEGRADED_RESPONSE: &str =
    "I'm sorry, but I'm currently experiencing technical difficulties. Please try again later.";

/// Canned reply served when every model tier is down
///
/// Known use cases get a tailored message; anything else gets
/// [`DEFAULT_DEGRADED_RESPONSE`].
pub fn degraded_response(use_case: &str) -> &'static str {
    match use_case {
        "general" => {
            "I'm sorry, but I'm currently experiencing technical difficulties. \
             Please try again later or contact customer service for immediate assistance."
        }
        "product_question" => {
            "I apologize, but I can't access product information right now. \
             Please refer to our product documentation or contact customer service \
             at 1-800-555-1234."
        }
        "account_inquiry" => {
            "I'm unable to process account inquiries at the moment. \
             For urgent matters, please call our customer service line at 1-800-555-1234."
        }
        _ => DEFAULT_DEGRADED_RESPONSE,
    }
}
