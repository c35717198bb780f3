use base85link::{decode, decode_text, encode, encode_text};
use base85link::{Codec, DecodeError, DecodeTextError, LINK};

use test_case::test_case;

#[test_case("", ""; "empty")]
#[test_case("asdf", "vrk;,"; "one group")]
#[test_case("hello", "xK#0@zV"; "partial group")]
#[test_case("hello world", "xK#0@zY_mxA+]m"; "two and a bit groups")]
#[test_case("a", "ve"; "single byte")]
#[test_case("héllo wörld ✓", "xV3/=y&pCu.)TP4wfx)4Lk"; "multibyte utf8")]
fn text_vectors(plain: &str, encoded: &str) {
    assert_eq!(encode_text(plain), encoded);
    assert_eq!(decode_text(encoded).unwrap(), plain);
}

#[test_case(&[0], "00")]
#[test_case(&[0, 0, 0, 0], "00000")]
#[test_case(&[0, 0, 0, 1], "00001")]
#[test_case(&[1, 2, 3], "0rJu")]
#[test_case(&[0xff, 0xff, 0xff, 0xff], ";nSc0")]
fn byte_vectors(bytes: &[u8], encoded: &str) {
    assert_eq!(encode(bytes), encoded);
    assert_eq!(decode(encoded).unwrap(), bytes);
}

#[test_case("a"; "lone symbol")]
#[test_case("#"; "lone padding symbol")]
#[test_case(" "; "lone non-symbol")]
#[test_case("vrk;,a"; "trailing lone symbol")]
#[test_case("vrk;,vrk;,0"; "trailing lone symbol after two groups")]
fn invalid_length(text: &str) {
    assert_eq!(decode(text), Err(DecodeError::InvalidLength));
    assert_eq!(
        decode_text(text),
        Err(DecodeTextError::Decode(DecodeError::InvalidLength)),
    );
}

#[test_case("ab cd", ' ', 2)]
#[test_case("vrk;,\"x", '"', 5)]
#[test_case("vrk;,ve<", '<', 7)]
#[test_case("vé", 'é', 1)]
#[test_case("0000000000%%", '%', 10)]
fn invalid_symbol(text: &str, symbol: char, index: usize) {
    assert_eq!(
        decode(text),
        Err(DecodeError::InvalidSymbol {
            symbol,
            index,
        }),
    );
}

#[test]
fn decodes_text_not_produced_by_encode() {
    // Every symbol is valid and no group is a lone symbol, so this decodes
    // even though no input encodes to it.
    assert_eq!(decode("#####").unwrap(), [0x08, 0x78, 0x0e, 0xc4]);
    assert_eq!(decode("##").unwrap().len(), 1);
}

#[test]
fn every_symbol_round_trips_in_a_group() {
    for &b in LINK.symbols() {
        let symbol = char::from(b);
        let value = LINK.value_of(symbol).unwrap();
        assert_eq!(LINK.symbol_for(value), Some(symbol));

        // As the lowest digit of a full group, every symbol fits in 32 bits
        // and comes back out of a decode/encode cycle unchanged.
        let group: String = ['0', '0', '0', '0', symbol].iter().collect();
        let bytes = decode(&group).unwrap();
        assert_eq!(bytes, [0, 0, 0, value]);
        assert_eq!(encode(bytes), group);
    }
}

#[test]
fn free_functions_match_default_codec() {
    let codec = Codec::default();
    assert_eq!(codec.alphabet(), &LINK);
    assert_eq!(codec.encode(b"hello"), encode(b"hello"));
    assert_eq!(codec.decode_text("vrk;,").unwrap(), "asdf");
}

#[test_case("vrk;,"; "valid")]
#[test_case("vrk;,v"; "lone symbol")]
#[test_case("vr k;"; "bad symbol")]
#[test_case(";nz"; "not utf8")]
fn free_functions_agree_with_codec(text: &str) {
    let codec = Codec::default();
    assert_eq!(decode(text), codec.decode(text));
    assert_eq!(decode_text(text), codec.decode_text(text));
    if let Ok(bytes) = decode(text) {
        assert_eq!(encode(&bytes), codec.encode(&bytes));
    }
}
