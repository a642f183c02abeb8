use super::*;

#[test]
fn encode_keeps_unreserved_and_escapes_rest() {
    assert_eq!(percent_encode("Dupont-Martin_2.0~"), "Dupont-Martin_2.0~");
    assert_eq!(percent_encode("jean dupont"), "jean%20dupont");
    assert_eq!(percent_encode("é&="), "%C3%A9%26%3D");
}

#[test]
fn encode_escapes_query_delimiters() {
    assert_eq!(percent_encode("a+b?c#d/e"), "a%2Bb%3Fc%23d%2Fe");
}
