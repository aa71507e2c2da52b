#![no_main]

use bytepool::{Buffer, FloatFormat, FloatWidth, Pool, PoolConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let pool = Pool::with_config(PoolConfig::new(4).with_max_idle(2).with_max_retained_capacity(256))
        .unwrap();
    let mut buf = pool.get();
    let mut expected_len = 0usize;

    // Interpret the input as a sequence of (opcode, 8-byte operand) records.
    for record in data.chunks(9) {
        let (op, rest) = match record.split_first() {
            Some(split) => split,
            None => break,
        };
        let mut word = [0u8; 8];
        word[..rest.len()].copy_from_slice(rest);
        let before = buf.len();

        let predicted = match op % 8 {
            0 => {
                let v = i64::from_le_bytes(word);
                buf.append_int(v);
                let text = v.to_string();
                assert_eq!(&buf.as_bytes()[before..], text.as_bytes());
                text.len()
            }
            1 => {
                let v = u64::from_le_bytes(word);
                buf.append_uint(v);
                let text = v.to_string();
                assert_eq!(&buf.as_bytes()[before..], text.as_bytes());
                text.len()
            }
            2 => {
                let v = f64::from_le_bytes(word);
                let format = match word[0] % 3 {
                    0 => FloatFormat::Decimal,
                    1 => FloatFormat::Exponent,
                    _ => FloatFormat::General,
                };
                let width = if word[1] % 2 == 0 { FloatWidth::F32 } else { FloatWidth::F64 };
                let precision = (word[2] % 4 != 0).then_some((word[3] % 20) as usize);

                let mut standalone = Buffer::new();
                standalone.append_float(v, format, precision, width);
                buf.append_float(v, format, precision, width);
                assert!(!standalone.is_empty());
                assert_eq!(&buf.as_bytes()[before..], standalone.as_bytes());

                // Shortest output reads back to the same value.
                let finite = match width {
                    FloatWidth::F32 => (v as f32).is_finite(),
                    FloatWidth::F64 => v.is_finite(),
                };
                if precision.is_none() && finite && format == FloatFormat::General {
                    let text = std::str::from_utf8(standalone.as_bytes()).unwrap();
                    let parsed: f64 = text.parse().unwrap();
                    match width {
                        FloatWidth::F64 => assert_eq!(parsed.to_bits(), v.to_bits()),
                        FloatWidth::F32 => {
                            assert_eq!((parsed as f32).to_bits(), (v as f32).to_bits())
                        }
                    }
                }
                standalone.len()
            }
            3 => {
                let v = word[0] & 1 == 1;
                buf.append_bool(v);
                if v { 4 } else { 5 }
            }
            4 => {
                buf.write_byte(word[0]);
                1
            }
            5 => {
                buf.append_bytes(rest);
                rest.len()
            }
            6 => {
                buf.reset();
                expected_len = 0;
                assert!(buf.is_empty());
                continue;
            }
            _ => {
                pool.put(buf);
                buf = pool.get();
                assert!(buf.is_empty());
                expected_len = 0;
                continue;
            }
        };

        expected_len += predicted;
        assert_eq!(buf.len(), expected_len);
        assert!(buf.len() <= buf.capacity());
    }

    pool.put(buf);
    assert!(pool.idle() <= 2);
});
