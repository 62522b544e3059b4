/*
 * Responsibility
 * - GET /health (liveness, no API key required)
 */
pub async fn health() -> &'static str {
    "OK"
}
