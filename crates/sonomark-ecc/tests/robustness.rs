use sonomark_ecc::{EccError, ErrorCorrection};

#[test]
fn reed_solomon_survives_scattered_symbol_errors() {
    let payload: Vec<u8> = (0..2000u32).map(|i| (i * 31 % 256) as u8).collect();
    let coded = ErrorCorrection::ReedSolomon
        .encode(&payload, 16)
        .expect("encode");

    // Two corrupted symbols in every 255-byte block, well under the
    // 8-symbol correction radius.
    let mut corrupted = coded.clone();
    for block_start in (0..corrupted.len()).step_by(255) {
        corrupted[block_start] ^= 0xFF;
        if block_start + 30 < corrupted.len() {
            corrupted[block_start + 30] ^= 0x0F;
        }
    }

    assert_eq!(
        ErrorCorrection::ReedSolomon
            .decode(&corrupted, 16)
            .expect("decode"),
        payload
    );
}

#[test]
fn hamming_survives_one_flip_per_stored_block() {
    let payload = b"resilient against single flips".to_vec();
    let r = 4; // 16-bit stored blocks
    let coded = ErrorCorrection::Hamming.encode(&payload, r).expect("encode");

    let mut corrupted = coded.clone();
    for block_start in (0..corrupted.len() * 8).step_by(16) {
        // Flip the third bit of each stored block.
        let bit = block_start + 2;
        corrupted[bit / 8] ^= 1 << (7 - bit % 8);
    }

    assert_eq!(
        ErrorCorrection::Hamming
            .decode(&corrupted, r)
            .expect("decode"),
        payload
    );
}

#[test]
fn corruption_beyond_the_radius_is_an_error_not_garbage() {
    let payload = vec![0xABu8; 64];
    let coded = ErrorCorrection::ReedSolomon
        .encode(&payload, 4)
        .expect("encode");

    let mut corrupted = coded;
    corrupted[3] ^= 0x01;
    corrupted[17] ^= 0x02;
    corrupted[33] ^= 0x04;
    assert!(matches!(
        ErrorCorrection::ReedSolomon.decode(&corrupted, 4),
        Err(EccError::UncorrectableCodeword { block: 0 })
    ));
}
