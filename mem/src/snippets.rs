// Copyright (C) 2025 the mapfn authors. All rights reserved.

//! Hand-assembled sample functions for the host architecture. Each
//! snippet respects the fixed entry-point signature: no arguments, a
//! 32-bit result in the return register, ending in a return.

/// Code for a function that returns `value`.
///
/// `mov eax, imm32; ret`.
#[cfg(target_arch = "x86_64")]
pub fn load_return(value: i32) -> Vec<u8> {
    let mut code = vec![0xB8];
    code.extend_from_slice(&value.to_le_bytes());
    code.push(0xC3);
    code
}

/// Code for a function that returns `value`.
///
/// `movz w0, #lo16; movk w0, #hi16, lsl #16; ret`, with the `movk`
/// omitted when the upper half is zero.
#[cfg(target_arch = "aarch64")]
pub fn load_return(value: i32) -> Vec<u8> {
    let bits = value as u32;
    let low = bits & 0xFFFF;
    let high = bits >> 16;

    let mut words = vec![0x5280_0000 | (low << 5)];
    if high != 0 {
        words.push(0x72A0_0000 | (high << 5));
    }
    words.push(0xD65F_03C0);

    words
        .into_iter()
        .flat_map(|word: u32| word.to_le_bytes())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn load_return_42_matches_the_known_encoding() {
        assert_eq!(
            vec![0xB8, 0x2A, 0x00, 0x00, 0x00, 0xC3],
            load_return(42)
        );
    }

    #[test]
    fn snippets_end_in_a_return() {
        let code = load_return(1234);
        #[cfg(target_arch = "x86_64")]
        assert_eq!(Some(&0xC3), code.last());
        #[cfg(target_arch = "aarch64")]
        assert_eq!(
            0xD65F_03C0u32.to_le_bytes().as_slice(),
            &code[code.len() - 4..]
        );
    }
}
