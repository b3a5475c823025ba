use super::decrypt;

#[test]
fn test_decrypt_rotates_each_byte_by_half_range() {
    let obfuscated = [b'N' + 128, b'a' + 128, 0x80, 0xff];

    assert_eq!(decrypt(&obfuscated), vec![b'N', b'a', 0x00, 0x7f]);
}

#[test]
fn test_decrypt_is_its_own_inverse() {
    let plaintext = "Name,AmountSubunits,CCNumber,CVV,ExpMonth,ExpYear\nMr. Grossman R Oldbuck,2879410,5375543637862918,488,11,2021\n";
    let obfuscated = decrypt(plaintext.as_bytes());

    assert_ne!(obfuscated, plaintext.as_bytes());
    assert_eq!(decrypt(&obfuscated), plaintext.as_bytes());
}

#[test]
fn test_decrypt_of_empty_input_is_empty() {
    assert!(decrypt(&[]).is_empty());
}
