use actix_web::middleware::DefaultHeaders;

/// Baseline hardening headers applied to every response. The API itself only
/// serves JSON, but Swagger UI ships inline scripts and styles, so the CSP
/// permits them for its assets.
const RESPONSE_HEADERS: &[(&str, &str)] = &[
    (
        "Strict-Transport-Security",
        "max-age=31536000; includeSubDomains",
    ),
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "DENY"),
    ("Referrer-Policy", "strict-origin-when-cross-origin"),
    (
        "Content-Security-Policy",
        "default-src 'self'; script-src 'self' 'unsafe-inline'; \
         style-src 'self' 'unsafe-inline'; img-src 'self' data:; \
         frame-ancestors 'none'; object-src 'none'",
    ),
];

pub fn security_headers() -> DefaultHeaders {
    RESPONSE_HEADERS
        .iter()
        .fold(DefaultHeaders::new(), |headers, &pair| headers.add(pair))
}
