// ==========================================
// 疫情暴发信号引擎 - 确定性种子派生
// ==========================================
// 职责: 把输入键元组纯函数式地映射为伪随机值
// 红线: 不允许任何全局 RNG 状态,并发模拟互不干扰
// 算法: FNV-1a 键哈希 + splitmix64 混淆 (跨平台/跨运行稳定)
// ==========================================

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a 64 位哈希
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// splitmix64 混淆 - 把相邻种子打散为均匀分布的 64 位值
pub fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// 由 (disease, location, year, day_of_year) 派生种子
///
/// 字段间插入 0xFF 分隔符,避免 ("ab","c") 与 ("a","bc") 同键
pub fn derive_seed(disease: &str, location: &str, year: i32, day_of_year: u32) -> u64 {
    let mut buf = Vec::with_capacity(disease.len() + location.len() + 10);
    buf.extend_from_slice(disease.as_bytes());
    buf.push(0xFF);
    buf.extend_from_slice(location.as_bytes());
    buf.push(0xFF);
    buf.extend_from_slice(&year.to_le_bytes());
    buf.extend_from_slice(&day_of_year.to_le_bytes());
    splitmix64(fnv1a64(&buf))
}

/// 把 64 位种子映射到 [0, 1)
pub fn unit_interval(seed: u64) -> f64 {
    // 取高 53 位,恰好填满 f64 尾数
    (seed >> 11) as f64 / (1u64 << 53) as f64
}
