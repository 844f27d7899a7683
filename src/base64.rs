// Copyright 2015-2021 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Text-safe transport envelope: standard-alphabet base64 with the classic
//! 76-column line discipline on encode and permissive whitespace on decode.

use crate::error::ModelError;
use ::base64::{decode_config, encode_config, STANDARD, STANDARD_NO_PAD};

/// Encoded line length; 57 input bytes fill exactly 76 output characters.
const LINE_CHARS: usize = 76;
const LINE_BYTES: usize = LINE_CHARS / 4 * 3;

/// Encode without line breaks (used for BYTES sentinels and string
/// conversions).
pub(crate) fn encode_plain(data: &[u8]) -> String {
    encode_config(data, STANDARD)
}

/// Encode with `\r\n` line breaks every 76 characters.
pub(crate) fn encode(data: &[u8]) -> String {
    let mut output = String::with_capacity((data.len() + 2) / 3 * 4 + data.len() / LINE_BYTES * 2);
    for (i, chunk) in data.chunks(LINE_BYTES).enumerate() {
        if i > 0 {
            output.push_str("\r\n");
        }
        output.push_str(&encode_config(chunk, STANDARD));
    }
    output
}

/// Decode, ignoring whitespace and padding wherever they occur. A character
/// outside the alphabet is reported as incorrect data.
pub(crate) fn decode(text: &str) -> Result<Vec<u8>, ModelError> {
    let mut filtered = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '+' | '/' => filtered.push(c),
            '=' | ' ' | '\t' | '\r' | '\n' => {}
            other => return Err(ModelError::IncorrectData(other)),
        }
    }
    decode_config(&filtered, STANDARD_NO_PAD)
        .map_err(|_| ModelError::grammar("incorrect base64 data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn round_trip_short() {
        let data = vec![0xde, 0xad, 0xbe, 0xef];
        let encoded = encode(&data);
        assert_eq!(encoded, "3q2+7w==");
        assert_eq!(decode(&encoded).unwrap(), data);
    }

    #[test]
    fn long_input_wraps_at_76_columns() {
        let data: Vec<u8> = (0..=255u8).collect();
        let encoded = encode(&data);
        for line in encoded.split("\r\n") {
            assert!(line.len() <= LINE_CHARS);
        }
        assert!(encoded.contains("\r\n"));
        assert_eq!(decode(&encoded).unwrap(), data);
    }

    #[test]
    fn whitespace_and_padding_are_ignored() {
        assert_eq!(decode("3q 2+\r\n7w = =").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn alien_characters_are_rejected() {
        match decode("3q2+7w*=") {
            Err(ModelError::IncorrectData('*')) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn unwrapped_form_has_no_breaks() {
        let data: Vec<u8> = (0..120u8).collect();
        assert!(!encode_plain(&data).contains('\r'));
    }
}
