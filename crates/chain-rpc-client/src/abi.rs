//! Minimal ABI encoding for router, factory and pair calls
//!
//! Only the static shapes these contracts use: `uint256`, `address` and a
//! dynamic `address[]` / `uint256[]`.

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use route_core::{Amount, OracleError, TokenAddress};

/// `getAmountsOut(uint256,address[])`
pub const GET_AMOUNTS_OUT: [u8; 4] = [0xd0, 0x6c, 0xa6, 0x1f];
/// `getAmountsIn(uint256,address[])`
pub const GET_AMOUNTS_IN: [u8; 4] = [0x1f, 0x00, 0xca, 0x74];
/// `allPairsLength()`
pub const ALL_PAIRS_LENGTH: [u8; 4] = [0x57, 0x4f, 0x2b, 0xa3];
/// `allPairs(uint256)`
pub const ALL_PAIRS: [u8; 4] = [0x1e, 0x3d, 0xd1, 0x8b];
/// `token0()`
pub const TOKEN0: [u8; 4] = [0x0d, 0xfe, 0x16, 0x81];
/// `token1()`
pub const TOKEN1: [u8; 4] = [0xd2, 0x12, 0x20, 0xa7];

const WORD: usize = 32;

/// Hex-encode call data with a `0x` prefix
pub fn to_hex_data(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode `0x`-prefixed (or bare) hex
pub fn from_hex_data(data: &str) -> Result<Vec<u8>, OracleError> {
    let stripped = data.strip_prefix("0x").unwrap_or(data);
    hex::decode(stripped).map_err(|e| OracleError::ParseError(format!("invalid hex: {}", e)))
}

fn uint_word(value: &BigUint) -> Result<[u8; WORD], OracleError> {
    let bytes = value.to_bytes_be();
    if bytes.len() > WORD {
        return Err(OracleError::ParseError(format!(
            "value {} does not fit in uint256",
            value
        )));
    }
    let mut word = [0u8; WORD];
    word[WORD - bytes.len()..].copy_from_slice(&bytes);
    Ok(word)
}

fn address_word(address: &TokenAddress) -> Result<[u8; WORD], OracleError> {
    let bytes = from_hex_data(address.as_str())?;
    if bytes.len() != 20 {
        return Err(OracleError::ParseError(format!(
            "address {} is not 20 bytes",
            address
        )));
    }
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(&bytes);
    Ok(word)
}

/// Encode `selector(uint256 amount, address[] path)`
pub fn encode_amounts_call(
    selector: [u8; 4],
    amount: &Amount,
    path: &[TokenAddress],
) -> Result<String, OracleError> {
    let mut data = Vec::with_capacity(4 + WORD * (3 + path.len()));
    data.extend_from_slice(&selector);
    data.extend_from_slice(&uint_word(amount.as_biguint())?);
    // Offset of the dynamic array, measured from the start of the arguments
    data.extend_from_slice(&uint_word(&BigUint::from(2 * WORD))?);
    data.extend_from_slice(&uint_word(&BigUint::from(path.len()))?);
    for token in path {
        data.extend_from_slice(&address_word(token)?);
    }
    Ok(to_hex_data(&data))
}

/// Encode a call with no arguments
pub fn encode_call(selector: [u8; 4]) -> String {
    to_hex_data(&selector)
}

/// Encode `selector(uint256 index)`
pub fn encode_index_call(selector: [u8; 4], index: u64) -> Result<String, OracleError> {
    let mut data = Vec::with_capacity(4 + WORD);
    data.extend_from_slice(&selector);
    data.extend_from_slice(&uint_word(&BigUint::from(index))?);
    Ok(to_hex_data(&data))
}

fn word_at(bytes: &[u8], offset: usize) -> Result<&[u8], OracleError> {
    bytes
        .get(offset..offset + WORD)
        .ok_or_else(|| OracleError::ParseError(format!("return data truncated at byte {}", offset)))
}

fn word_as_usize(word: &[u8]) -> Result<usize, OracleError> {
    BigUint::from_bytes_be(word)
        .to_u32()
        .map(|v| v as usize)
        .ok_or_else(|| OracleError::ParseError("offset or length out of range".to_string()))
}

/// Decode a single `uint256` return value
pub fn decode_uint(data: &str) -> Result<BigUint, OracleError> {
    let bytes = from_hex_data(data)?;
    Ok(BigUint::from_bytes_be(word_at(&bytes, 0)?))
}

/// Decode a single `address` return value
pub fn decode_address(data: &str) -> Result<TokenAddress, OracleError> {
    let bytes = from_hex_data(data)?;
    let word = word_at(&bytes, 0)?;
    Ok(TokenAddress::new(to_hex_data(&word[12..])))
}

/// Decode a `uint256[]` return value
pub fn decode_uint_array(data: &str) -> Result<Vec<Amount>, OracleError> {
    let bytes = from_hex_data(data)?;
    let offset = word_as_usize(word_at(&bytes, 0)?)?;
    let len = word_as_usize(word_at(&bytes, offset)?)?;

    (0..len)
        .map(|i| {
            let word = word_at(&bytes, offset + WORD * (i + 1))?;
            Ok(Amount::from(BigUint::from_bytes_be(word)))
        })
        .collect()
}

/// Encode a `uint256[]` return value (used by test endpoints)
pub fn encode_uint_array(values: &[Amount]) -> Result<String, OracleError> {
    let mut data = Vec::with_capacity(WORD * (2 + values.len()));
    data.extend_from_slice(&uint_word(&BigUint::from(WORD))?);
    data.extend_from_slice(&uint_word(&BigUint::from(values.len()))?);
    for value in values {
        data.extend_from_slice(&uint_word(value.as_biguint())?);
    }
    Ok(to_hex_data(&data))
}

/// Encode a single `address` return value (used by test endpoints)
pub fn encode_address(address: &TokenAddress) -> Result<String, OracleError> {
    Ok(to_hex_data(&address_word(address)?))
}

/// Encode a single `uint256` return value (used by test endpoints)
pub fn encode_uint(value: &BigUint) -> Result<String, OracleError> {
    Ok(to_hex_data(&uint_word(value)?))
}

/// Split call data into selector and argument words
pub fn split_call(data: &str) -> Result<([u8; 4], Vec<u8>), OracleError> {
    let bytes = from_hex_data(data)?;
    if bytes.len() < 4 {
        return Err(OracleError::ParseError("call data shorter than selector".into()));
    }
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&bytes[..4]);
    Ok((selector, bytes[4..].to_vec()))
}

/// Decode the arguments of an amounts call back into amount and path
pub fn decode_amounts_args(args: &[u8]) -> Result<(Amount, Vec<TokenAddress>), OracleError> {
    let amount = Amount::from(BigUint::from_bytes_be(word_at(args, 0)?));
    let offset = word_as_usize(word_at(args, WORD)?)?;
    let len = word_as_usize(word_at(args, offset)?)?;
    let path = (0..len)
        .map(|i| {
            let word = word_at(args, offset + WORD * (i + 1))?;
            Ok(TokenAddress::new(to_hex_data(&word[12..])))
        })
        .collect::<Result<Vec<_>, OracleError>>()?;
    Ok((amount, path))
}
