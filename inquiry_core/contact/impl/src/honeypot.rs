/// Whether the hidden form field has been filled in, which only automated
/// clients do.
pub fn is_triggered(honeypot: &str) -> bool {
    !honeypot.is_empty()
}
