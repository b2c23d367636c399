mod bitconverter {
    use crate::bitconverter::*;
    use crate::enums::SampleFormatCode;

    #[test]
    fn ibm_to_ieee_known_words() {
        // 0x41100000 is 0.0625 * 16^1.
        assert_eq!(f32::from_bits(ibm_to_ieee(0x4110_0000)), 1.0);
        // 0xC2080000 is -0.03125 * 16^2, stored with a leading zero nibble.
        assert_eq!(f32::from_bits(ibm_to_ieee(0xC208_0000)), -8.0);
        // The textbook example from the IBM hexadecimal float format.
        assert_eq!(f32::from_bits(ibm_to_ieee(0xC276_A000)), -118.625);
        assert_eq!(f32::from_bits(ibm_to_ieee(0x4264_0000)), 100.0);
    }

    #[test]
    fn ieee_to_ibm_known_words() {
        assert_eq!(ieee_to_ibm(1.0f32.to_bits()), 0x4110_0000);
        assert_eq!(ieee_to_ibm((-118.625f32).to_bits()), 0xC276_A000);
        assert_eq!(ieee_to_ibm(100.0f32.to_bits()), 0x4264_0000);
        // -8.0 re-encodes in normalised form, not as the 0xC2080000 variant.
        assert_eq!(ieee_to_ibm((-8.0f32).to_bits()), 0xC180_0000);
    }

    #[test]
    fn ibm_round_trip_is_exact_for_normalised_words() {
        for word in [
            0x4110_0000u32, // 1.0
            0xC110_0000,    // -1.0
            0x4264_0000,    // 100.0
            0xC276_A000,    // -118.625
            0x4080_0000,    // 0.5
            0x4511_2233,
            0xC554_3210,
        ] {
            assert_eq!(ieee_to_ibm(ibm_to_ieee(word)), word, "word {:#010x}", word);
        }
    }

    #[test]
    fn ieee_round_trip_is_exact_in_range() {
        for v in [0.0f32, 1.0, -1.0, 0.5, 3.25, -118.625, 1.0e6, 0.000244140625] {
            let back = f32::from_bits(ibm_to_ieee(ieee_to_ibm(v.to_bits())));
            assert_eq!(back, v, "value {}", v);
        }
    }

    #[test]
    fn ibm_signed_zero() {
        assert_eq!(ibm_to_ieee(0x0000_0000), 0.0f32.to_bits());
        assert_eq!(ibm_to_ieee(0x8000_0000), (-0.0f32).to_bits());
        // A zero fraction is zero whatever the exponent says.
        assert_eq!(ibm_to_ieee(0x4200_0000), 0.0f32.to_bits());
        assert_eq!(ieee_to_ibm(0.0f32.to_bits()), 0);
        assert_eq!(ieee_to_ibm((-0.0f32).to_bits()), 0x8000_0000);
    }

    #[test]
    fn ibm_overflow_gives_signed_infinity() {
        assert_eq!(f32::from_bits(ibm_to_ieee(0x7FFF_FFFF)), f32::INFINITY);
        assert_eq!(f32::from_bits(ibm_to_ieee(0xFFFF_FFFF)), f32::NEG_INFINITY);
    }

    #[test]
    fn ibm_underflow_flushes_to_zero() {
        // Exponent 0 means 16^-64; far below the smallest IEEE subnormal.
        assert_eq!(f32::from_bits(ibm_to_ieee(0x0010_0000)), 0.0);
        assert_eq!(f32::from_bits(ibm_to_ieee(0x8010_0000)), -0.0);
    }

    #[test]
    fn ieee_specials_map_to_largest_finite_magnitude() {
        assert_eq!(ieee_to_ibm(f32::INFINITY.to_bits()), 0x7FFF_FFFF);
        assert_eq!(ieee_to_ibm(f32::NEG_INFINITY.to_bits()), 0xFFFF_FFFF);
        assert_eq!(ieee_to_ibm(f32::NAN.to_bits()), 0x7FFF_FFFF);
    }

    fn raw_slot(be_word: u32) -> f32 {
        f32::from_bits(u32::from_ne_bytes(be_word.to_be_bytes()))
    }

    #[test]
    fn to_native_decodes_ibm_and_ieee_buffers() {
        let mut buf = [raw_slot(0x4110_0000), raw_slot(0xC276_A000)];
        to_native(SampleFormatCode::IbmFloat32, &mut buf);
        assert_eq!(buf, [1.0, -118.625]);

        let mut buf = [raw_slot(42.5f32.to_bits()), raw_slot((-0.25f32).to_bits())];
        to_native(SampleFormatCode::Float32, &mut buf);
        assert_eq!(buf, [42.5, -0.25]);
    }

    #[test]
    fn to_native_passes_other_formats_through() {
        let raw = [raw_slot(0x0000_002A)];
        let mut buf = raw;
        to_native(SampleFormatCode::Int32, &mut buf);
        assert_eq!(buf[0].to_bits(), raw[0].to_bits());
    }

    #[test]
    fn from_native_then_to_native_is_identity() {
        for format in [SampleFormatCode::IbmFloat32, SampleFormatCode::Float32] {
            let mut buf = [1.25f32, -3.5, 0.0, 1024.0];
            from_native(format, &mut buf);
            to_native(format, &mut buf);
            assert_eq!(buf, [1.25, -3.5, 0.0, 1024.0], "format {:?}", format);
        }
    }

    #[test]
    fn ebcdic_ascii_known_bytes() {
        let mut buf = [0xC1, 0x40];
        ebcdic_to_ascii(&mut buf);
        assert_eq!(&buf, b"A ");
        ascii_to_ebcdic(&mut buf);
        assert_eq!(buf, [0xC1, 0x40]);
    }

    #[test]
    fn ebcdic_round_trip_on_printable_text() {
        let text = b"C 1 CLIENT: EXAMPLE AS, AREA 51/2, crew no. 7 (+terse &punct.!?)";
        let mut buf = text.to_vec();
        ascii_to_ebcdic(&mut buf);
        assert_ne!(&buf[..], &text[..]);
        ebcdic_to_ascii(&mut buf);
        assert_eq!(&buf[..], &text[..]);
    }

    #[test]
    fn ascii_bytes_to_string_truncates_at_nul() {
        assert_eq!(&ascii_bytes_to_string(b"header\0junk"), "header");
        assert_eq!(&ascii_bytes_to_string(b"whole"), "whole");
    }
}

mod fields {
    use crate::fields::*;
    use crate::{SegyError, BIN_HEADER_LEN, TRACE_HEADER_LEN};

    #[test]
    fn trace_set_then_get_round_trips_every_field() {
        let mut header = [0u8; TRACE_HEADER_LEN];
        for byte in 1..=TRACE_HEADER_LEN {
            let vals: &[i32] = match trace_field_width(byte) {
                4 => &[0, 1, -1, 123_456_789, i32::MAX, i32::MIN],
                2 => &[0, 1, -1, 32_000, i16::MAX as i32, i16::MIN as i32],
                _ => continue,
            };
            for &v in vals {
                set_field(&mut header, byte, v).unwrap();
                assert_eq!(get_field(&header, byte).unwrap(), v, "byte {}", byte);
            }
        }
    }

    #[test]
    fn bin_set_then_get_round_trips() {
        let mut header = [0u8; BIN_HEADER_LEN];
        for (byte, v) in [
            (BinField::JobId as usize, 77_001),
            (BinField::Interval as usize, 4000),
            (BinField::Samples as usize, 50),
            (BinField::Format as usize, 1),
            (BinField::SortingCode as usize, 4),
            (BinField::ExtendedHeaders as usize, 2),
            (BinField::LineNumber as usize, -5),
        ] {
            set_bfield(&mut header, byte, v).unwrap();
            assert_eq!(get_bfield(&header, byte).unwrap(), v, "byte {}", byte);
        }
    }

    #[test]
    fn unrecognised_offsets_are_refused() {
        let trace = [0u8; TRACE_HEADER_LEN];
        let bin = [0u8; BIN_HEADER_LEN];
        // Mid-field, out of range low and high.
        for byte in [0usize, 2, 190, 238, 239, 240, 241, 500] {
            assert!(
                matches!(get_field(&trace, byte), Err(SegyError::InvalidField { .. })),
                "byte {}",
                byte
            );
        }
        // Unassigned region of the binary header, bounds, and trace-relative
        // offsets which are invalid for the binary header.
        for byte in [0usize, 37, 3200, 3261, 3300, 3600, 3601] {
            assert!(
                matches!(get_bfield(&bin, byte), Err(SegyError::InvalidField { .. })),
                "byte {}",
                byte
            );
        }
    }

    #[test]
    fn short_buffers_are_refused() {
        let mut buf = [0u8; 10];
        assert!(matches!(
            get_field(&buf, 1),
            Err(SegyError::InvalidArgs { .. })
        ));
        assert!(matches!(
            set_bfield(&mut buf, 3201, 1),
            Err(SegyError::InvalidArgs { .. })
        ));
    }

    #[test]
    fn two_byte_fields_sign_extend() {
        let mut header = [0u8; TRACE_HEADER_LEN];
        set_field(&mut header, TraceField::ElevationScalar as usize, -100).unwrap();
        assert_eq!(
            get_field(&header, TraceField::ElevationScalar as usize).unwrap(),
            -100
        );
        // The raw bytes really are the two's complement big-endian pattern.
        assert_eq!(&header[68..70], &[0xFF, 0x9C]);
    }

    #[test]
    fn binheader_convenience_readers() {
        let mut bin = [0u8; BIN_HEADER_LEN];
        set_bfield(&mut bin, BinField::Samples as usize, 50).unwrap();
        set_bfield(&mut bin, BinField::Format as usize, 1).unwrap();
        set_bfield(&mut bin, BinField::ExtendedHeaders as usize, 2).unwrap();

        assert_eq!(samples(&bin).unwrap(), 50);
        assert_eq!(format(&bin).unwrap(), crate::SampleFormatCode::IbmFloat32);
        assert_eq!(trace0(&bin).unwrap(), 3600 + 2 * 3200);
        assert_eq!(trace_bsize(50), 200);
    }

    #[test]
    fn zero_sample_count_is_refused() {
        let bin = [0u8; BIN_HEADER_LEN];
        assert!(matches!(samples(&bin), Err(SegyError::InvalidArgs { .. })));
    }
}

mod enums {
    use crate::enums::*;

    #[test]
    fn sample_format_code_new() {
        assert_eq!(
            SampleFormatCode::new(1).unwrap(),
            SampleFormatCode::IbmFloat32
        );
        assert_eq!(SampleFormatCode::new(2).unwrap(), SampleFormatCode::Int32);
        assert_eq!(SampleFormatCode::new(3).unwrap(), SampleFormatCode::Int16);
        assert_eq!(
            SampleFormatCode::new(4).unwrap(),
            SampleFormatCode::FixPoint32
        );
        assert_eq!(SampleFormatCode::new(5).unwrap(), SampleFormatCode::Float32);
        assert!(SampleFormatCode::new(6).is_err());
        assert!(SampleFormatCode::new(7).is_err());
        assert_eq!(SampleFormatCode::new(8).unwrap(), SampleFormatCode::Int8);
        assert!(SampleFormatCode::new(0).is_err());
        assert!(SampleFormatCode::new(9).is_err());
    }

    #[test]
    fn sample_format_code_datum_byte_length() {
        assert_eq!(SampleFormatCode::IbmFloat32.datum_byte_length(), 4);
        assert_eq!(SampleFormatCode::Int32.datum_byte_length(), 4);
        assert_eq!(SampleFormatCode::Int16.datum_byte_length(), 2);
        assert_eq!(SampleFormatCode::FixPoint32.datum_byte_length(), 4);
        assert_eq!(SampleFormatCode::Float32.datum_byte_length(), 4);
        assert_eq!(SampleFormatCode::Int8.datum_byte_length(), 1);
    }

    #[test]
    fn trace_sorting_code_new() {
        use self::TraceSortingCode::*;
        assert_eq!(Other, TraceSortingCode::new(-1));
        assert_eq!(Unknown, TraceSortingCode::new(0));
        assert_eq!(CommonMidPoint, TraceSortingCode::new(8));
        assert_eq!(Invalid, TraceSortingCode::new(-50));
        assert_eq!(Invalid, TraceSortingCode::new(50));
    }
}

mod settings {
    use crate::settings::SegySettings;

    #[test]
    fn defaults_are_the_rev1_locations() {
        let s = SegySettings::default();
        assert_eq!(s.inline_no_byte(), 189);
        assert_eq!(s.crossline_no_byte(), 193);
        assert_eq!(s.offset_byte(), 37);
    }

    #[test]
    fn byte_locations_are_validated() {
        let mut s = SegySettings::default();
        s.set_inline_no_byte(5).unwrap();
        s.set_crossline_no_byte(9).unwrap();
        s.set_offset_byte(237).unwrap();
        assert_eq!(s.inline_no_byte(), 5);
        assert_eq!(s.crossline_no_byte(), 9);
        assert_eq!(s.offset_byte(), 237);

        assert!(s.set_inline_no_byte(0).is_err());
        assert!(s.set_crossline_no_byte(238).is_err());
        assert!(s.set_offset_byte(usize::MAX).is_err());
    }
}
