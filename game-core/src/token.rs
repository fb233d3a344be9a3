use rand::Rng;

const TOKEN_LEN: usize = 12;
const TOKEN_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Opaque lowercase-alphanumeric secret used to address games and to
/// authenticate players. Uniqueness within a scope is enforced by the
/// issuer, not here.
pub fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_CHARS[rng.gen_range(0..TOKEN_CHARS.len())] as char)
        .collect()
}
