use crate::domain::model::StudentSession;
use chrono::Utc;
use uuid::Uuid;

const SUFFIX_LEN: usize = 5;
const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Builds `STU-<millis in base 36>-<5 random base 36 chars>`.
///
/// Unique per process with high probability; not meant to be unguessable.
pub fn generate() -> StudentSession {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let random = (Uuid::new_v4().as_u128() % 36u128.pow(SUFFIX_LEN as u32)) as u64;
    let suffix = format!("{:0>width$}", to_base36(random), width = SUFFIX_LEN);

    StudentSession::new(format!("STU-{}-{}", to_base36(millis), suffix))
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
