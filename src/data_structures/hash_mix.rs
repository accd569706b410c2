/// Scramble a packed key so that every input bit reaches both the low bits
/// (which pick the start slot of a hash table) and the high bits (which form its control tag).
///
/// Packed keys fed to `nohash_hasher` go through this; only small sequential ids may skip it.
#[inline(always)]
pub(crate) fn mix64(mut bits: u64) -> u64 {
	bits ^= bits >> 33;
	bits = bits.wrapping_mul(0xff51_afd7_ed55_8ccd);
	bits ^= bits >> 33;
	bits = bits.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
	bits ^ (bits >> 33)
}
