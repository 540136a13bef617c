/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at POS scale)
///
/// Every persisted row (areas, tables, orders, ...) gets its ID from
/// here so URLs and QR codes stay numeric and front-end safe.
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflake_fits_in_53_bits() {
        for _ in 0..64 {
            let id = snowflake_id();
            assert!(id > 0);
            assert!(id < (1i64 << 53));
        }
    }

    #[test]
    fn snowflake_is_time_ordered_across_millis() {
        let a = snowflake_id() >> 12;
        std::thread::sleep(std::time::Duration::from_millis(3));
        let b = snowflake_id() >> 12;
        assert!(b > a);
    }
}
