// Copyright 2019 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

// Permission is hereby granted, free of charge, to any person obtaining a copy of this
// software and associated documentation files (the "Software"), to deal in the Software
// without restriction, including without limitation the rights to use, copy, modify,
// merge, publish, distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED,
// INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT
// HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE
// SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
mod common;

use common::{orient, random_plane};
use fc::{
    convert_frame, converters, describe_acceleration, get_buffers_size, is_supported,
    ConversionFlag, DataType, ErrorKind, Frame, FrameMut, FrameType, PixelFormat, PixelOrigin,
    ValueRange, MAX_NUMBER_OF_PLANES,
};
use frame_converter as fc;
use itertools::iproduct;
use std::collections::HashSet;

const DATA_TYPES: [DataType; 11] = [
    DataType::UnsignedInteger8,
    DataType::SignedInteger8,
    DataType::UnsignedInteger16,
    DataType::SignedInteger16,
    DataType::UnsignedInteger32,
    DataType::SignedInteger32,
    DataType::UnsignedInteger64,
    DataType::SignedInteger64,
    DataType::SignedFloat16,
    DataType::SignedFloat32,
    DataType::SignedFloat64,
];

fn check_err(result: ErrorKind, err: ErrorKind) {
    assert_eq!(result as u32, err as u32);
}

#[test]
fn bootstrap() {
    let description = describe_acceleration();
    println!("{description}");
    assert!(description.starts_with("{cpu-manufacturer:"));
    assert!(description.contains(",instruction-set:"));
}

#[test]
fn predefined_ids_are_unique() {
    let mut ids = HashSet::new();
    for pixel_format in PixelFormat::PREDEFINED {
        let id = pixel_format.id();
        assert_ne!(id, 0, "{pixel_format}");
        assert!(ids.insert(id), "{pixel_format} shares its id");
    }
}

#[test]
fn generic_round_trip() {
    for (data_type, channels) in iproduct!(DATA_TYPES, 1..=8_u32) {
        let pixel_format = PixelFormat::generic(data_type, channels, 1, 1, 1);
        assert!(pixel_format.is_generic());
        assert_eq!(pixel_format.data_type(), data_type);
        assert_eq!(pixel_format.channels(), channels);
        assert_eq!(
            PixelFormat::generic(
                pixel_format.data_type(),
                pixel_format.channels(),
                pixel_format.number_planes(),
                pixel_format.width_multiple(),
                pixel_format.height_multiple(),
            ),
            pixel_format
        );
    }

    for pixel_format in PixelFormat::PREDEFINED {
        let generic = pixel_format.to_generic();
        if pixel_format.is_generic() {
            assert_eq!(generic.id(), 0);
            assert_eq!(generic.data_type(), pixel_format.data_type());
            assert_eq!(generic.channels(), pixel_format.channels());
        } else {
            assert_eq!(generic, PixelFormat::UNDEFINED);
        }
    }

    assert_eq!(
        PixelFormat::generic(DataType::Undefined, 3, 1, 1, 1),
        PixelFormat::UNDEFINED
    );
    assert_eq!(
        PixelFormat::generic(DataType::UnsignedInteger8, 0, 1, 1, 1),
        PixelFormat::UNDEFINED
    );
}

#[test]
fn names() {
    for pixel_format in PixelFormat::PREDEFINED {
        assert_eq!(PixelFormat::from_name(pixel_format.name()), *pixel_format);
        assert_eq!(pixel_format.to_string(), pixel_format.name());
    }

    assert_eq!(PixelFormat::from_name("Y_UV12_LIMITED_RANGE"), PixelFormat::Y_UV12);
    assert_eq!(PixelFormat::from_name("Y8_FULL_RANGE"), PixelFormat::Y8);
    assert_eq!(PixelFormat::from_name("NV12"), PixelFormat::UNDEFINED);
    assert_eq!(PixelFormat::from_name(""), PixelFormat::UNDEFINED);
    assert_eq!(PixelFormat::UNDEFINED.name(), "UNDEFINED");
}

#[test]
fn value_ranges() {
    assert_eq!(PixelFormat::Y_UV12.value_range(), Some(ValueRange::Limited));
    assert_eq!(
        PixelFormat::Y_UV12_FULL_RANGE.value_range(),
        Some(ValueRange::Full)
    );
    assert_eq!(PixelFormat::Y8_FULL_RANGE.value_range(), Some(ValueRange::Full));
    assert_eq!(PixelFormat::RGB24.value_range(), None);
}

#[test]
fn buffers_size() {
    const WIDTH: u32 = 4098;
    const HEIGHT: u32 = 258;
    let buffers_size = &mut [0_usize; MAX_NUMBER_OF_PLANES];
    let w = WIDTH as usize;
    let h = HEIGHT as usize;

    let expected: &[(PixelFormat, &[usize])] = &[
        (PixelFormat::RGB24, &[3 * w * h]),
        (PixelFormat::BGRA32, &[4 * w * h]),
        (PixelFormat::Y8, &[w * h]),
        (PixelFormat::Y10, &[2 * w * h]),
        (PixelFormat::YUYV16, &[2 * w * h]),
        (PixelFormat::Y_UV12, &[w * h, w * h / 2]),
        (PixelFormat::Y_U_V12, &[w * h, w * h / 4, w * h / 4]),
        (PixelFormat::Y_U_V24, &[w * h, w * h, w * h]),
        (PixelFormat::F64, &[8 * w * h]),
    ];

    for (pixel_format, sizes) in expected {
        get_buffers_size(WIDTH, HEIGHT, *pixel_format, None, buffers_size).unwrap();
        assert_eq!(&buffers_size[..sizes.len()], *sizes, "{pixel_format}");

        // Padding is counted in elements of the data type
        let padding = [1_u32, 2, 3];
        get_buffers_size(WIDTH, HEIGHT, *pixel_format, Some(&padding), buffers_size).unwrap();
        let element = pixel_format.data_type().bytes();
        for (plane, size) in sizes.iter().enumerate() {
            let rows = pixel_format
                .plane_layout(WIDTH, HEIGHT, plane as u32)
                .unwrap()
                .height as usize;
            assert_eq!(
                buffers_size[plane],
                size + (padding[plane] as usize) * element * rows,
                "{pixel_format} plane {plane}"
            );
        }

        check_err(
            get_buffers_size(WIDTH, HEIGHT, *pixel_format, None, &mut buffers_size[..0])
                .unwrap_err(),
            ErrorKind::NotEnoughData,
        );
    }

    // Y10_PACKED stores four pixels in five bytes
    get_buffers_size(8, 2, PixelFormat::Y10_PACKED, None, buffers_size).unwrap();
    assert_eq!(buffers_size[0], 20);

    for (width, height) in [(WIDTH - 1, HEIGHT), (WIDTH, HEIGHT - 1), (0, HEIGHT)] {
        check_err(
            get_buffers_size(width, height, PixelFormat::Y_UV12, None, buffers_size).unwrap_err(),
            ErrorKind::InvalidValue,
        );
    }

    check_err(
        get_buffers_size(WIDTH, HEIGHT, PixelFormat::UNDEFINED, None, buffers_size).unwrap_err(),
        ErrorKind::InvalidValue,
    );
}

#[test]
fn frame_conversion_matches_named_conversion() {
    const WIDTH: u32 = 12;
    const HEIGHT: u32 = 8;
    let w = WIDTH as usize;
    let h = HEIGHT as usize;

    let source_type =
        FrameType::new(WIDTH, HEIGHT, PixelFormat::RGB24, PixelOrigin::UpperLeft).unwrap();
    let rgb = random_plane(3 * w, h, 1);

    for (flag, origin) in iproduct!(
        ConversionFlag::ALL,
        [PixelOrigin::UpperLeft, PixelOrigin::LowerLeft]
    ) {
        let source = Frame::new(source_type, &[&rgb[..]], Some(&[1])).unwrap();

        let mut y = vec![0_u8; w * h];
        let mut uv = vec![0_u8; w * h / 2];
        let target_type = FrameType::new(WIDTH, HEIGHT, PixelFormat::Y_UV12, origin).unwrap();
        let mut target =
            FrameMut::new(target_type, vec![&mut y[..], &mut uv[..]], None).unwrap();
        convert_frame(&source, &mut target, flag, None).unwrap();
        drop(target);

        let expected_flag = if origin == PixelOrigin::UpperLeft {
            flag
        } else {
            flag.toggle_flip()
        };

        let mut expected_y = vec![0_u8; w * h];
        let mut expected_uv = vec![0_u8; w * h / 2];
        converters::convert_rgb24_to_y_uv12(
            &rgb,
            &mut expected_y,
            &mut expected_uv,
            WIDTH,
            HEIGHT,
            expected_flag,
            1,
            0,
            0,
            None,
        )
        .unwrap();

        assert_eq!(y, expected_y, "{flag} {origin:?}");
        assert_eq!(uv, expected_uv, "{flag} {origin:?}");
    }
}

#[test]
fn frame_origins_flip_the_image() {
    const WIDTH: u32 = 5;
    const HEIGHT: u32 = 3;
    let w = WIDTH as usize;
    let h = HEIGHT as usize;
    let rgb = random_plane(3 * w, h, 0);

    let source_type =
        FrameType::new(WIDTH, HEIGHT, PixelFormat::RGB24, PixelOrigin::LowerLeft).unwrap();
    let target_type =
        FrameType::new(WIDTH, HEIGHT, PixelFormat::RGB24, PixelOrigin::UpperLeft).unwrap();
    let source = Frame::new(source_type, &[&rgb[..]], None).unwrap();

    let mut copy = vec![0_u8; 3 * w * h];
    let mut target = FrameMut::new(target_type, vec![&mut copy[..]], None).unwrap();
    convert_frame(&source, &mut target, ConversionFlag::Normal, None).unwrap();
    drop(target);

    assert_eq!(copy, orient(&rgb, w, h, 3, ConversionFlag::Flipped));
}

#[test]
fn frame_conversion_into_y10() {
    let packed = [0xFF_u8, 0x00, 0x10, 0x01, 0b0001_1011];
    let source_type = FrameType::new(4, 1, PixelFormat::Y10_PACKED, PixelOrigin::UpperLeft).unwrap();
    let target_type = FrameType::new(4, 1, PixelFormat::Y10, PixelOrigin::UpperLeft).unwrap();
    let source = Frame::new(source_type, &[&packed[..]], None).unwrap();

    let mut y10 = [0_u16; 4];
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut y10[..]);
    let mut target = FrameMut::new(target_type, vec![bytes], None).unwrap();
    convert_frame(&source, &mut target, ConversionFlag::Normal, None).unwrap();
    drop(target);

    assert_eq!(y10, [0x3FF, 0x002, 0x041, 0x004]);
}

#[test]
fn unsupported_frame_conversions() {
    let rgb = [0_u8; 12];
    let mut target_data = [0_u8; 8];

    let source_type = FrameType::new(2, 2, PixelFormat::RGB24, PixelOrigin::UpperLeft).unwrap();
    let source = Frame::new(source_type, &[&rgb[..]], None).unwrap();

    for target_format in [PixelFormat::YUYV16, PixelFormat::F32] {
        let target_type = FrameType::new(2, 2, target_format, PixelOrigin::UpperLeft).unwrap();
        let mut buffer = vec![0_u8; 64];
        let mut target = FrameMut::new(target_type, vec![&mut buffer[..]], None).unwrap();
        check_err(
            convert_frame(&source, &mut target, ConversionFlag::Normal, None).unwrap_err(),
            ErrorKind::InvalidOperation,
        );
    }

    // RGB24 does not convert into generic formats
    let generic_type = FrameType::new(
        2,
        2,
        PixelFormat::generic(DataType::UnsignedInteger8, 2, 1, 1, 1),
        PixelOrigin::UpperLeft,
    )
    .unwrap();
    let mut target = FrameMut::new(generic_type, vec![&mut target_data[..]], None).unwrap();
    check_err(
        convert_frame(&source, &mut target, ConversionFlag::Normal, None).unwrap_err(),
        ErrorKind::InvalidOperation,
    );

    // Dimensions must match
    let mut y = [0_u8; 8];
    let smaller_type = FrameType::new(2, 4, PixelFormat::Y8, PixelOrigin::UpperLeft).unwrap();
    let mut target = FrameMut::new(smaller_type, vec![&mut y[..]], None).unwrap();
    check_err(
        convert_frame(&source, &mut target, ConversionFlag::Normal, None).unwrap_err(),
        ErrorKind::InvalidValue,
    );
}

#[test]
fn same_format_copies() {
    const WIDTH: u32 = 6;
    const HEIGHT: u32 = 4;
    let w = WIDTH as usize;
    let h = HEIGHT as usize;

    // Semi-planar frame, each plane is reordered on its own
    let y = random_plane(w, h, 2);
    let uv = random_plane(w, h / 2, 0);
    let frame_type =
        FrameType::new(WIDTH, HEIGHT, PixelFormat::Y_UV12, PixelOrigin::UpperLeft).unwrap();
    let source = Frame::new(frame_type, &[&y[..], &uv[..]], Some(&[2, 0])).unwrap();

    let mut y_copy = vec![0_u8; w * h];
    let mut uv_copy = vec![0_u8; w * h / 2];
    let mut target =
        FrameMut::new(frame_type, vec![&mut y_copy[..], &mut uv_copy[..]], None).unwrap();
    convert_frame(&source, &mut target, ConversionFlag::FlippedAndMirrored, None).unwrap();
    drop(target);

    let visible_y = common::strip_padding(&y, w, h, 2);
    assert_eq!(y_copy, orient(&visible_y, w, h, 1, ConversionFlag::FlippedAndMirrored));
    assert_eq!(uv_copy, orient(&uv, w / 2, h / 2, 2, ConversionFlag::FlippedAndMirrored));

    // Float pixels move as a whole
    let f32_type = FrameType::new(WIDTH, HEIGHT, PixelFormat::F32, PixelOrigin::UpperLeft).unwrap();
    let values = random_plane(4 * w, h, 0);
    let source = Frame::new(f32_type, &[&values[..]], None).unwrap();
    let mut copy = vec![0_u8; 4 * w * h];
    let mut target = FrameMut::new(f32_type, vec![&mut copy[..]], None).unwrap();
    convert_frame(&source, &mut target, ConversionFlag::Flipped, None).unwrap();
    drop(target);
    assert_eq!(copy, orient(&values, w, h, 4, ConversionFlag::Flipped));

    // Generic formats only copy into themselves
    let generic = PixelFormat::generic(DataType::UnsignedInteger16, 2, 1, 1, 1);
    let generic_type = FrameType::new(WIDTH, HEIGHT, generic, PixelOrigin::UpperLeft).unwrap();
    let samples = random_plane(4 * w, h, 0);
    let source = Frame::new(generic_type, &[&samples[..]], None).unwrap();
    let mut copy = vec![0_u8; 4 * w * h];
    let mut target = FrameMut::new(generic_type, vec![&mut copy[..]], None).unwrap();
    convert_frame(&source, &mut target, ConversionFlag::Mirrored, None).unwrap();
    drop(target);
    assert_eq!(copy, orient(&samples, w, h, 4, ConversionFlag::Mirrored));
}

#[test]
fn packed_422_copies_refuse_mirroring() {
    const WIDTH: u32 = 4;
    const HEIGHT: u32 = 2;
    let yuyv = random_plane(2 * WIDTH as usize, HEIGHT as usize, 0);
    let frame_type =
        FrameType::new(WIDTH, HEIGHT, PixelFormat::YUYV16, PixelOrigin::UpperLeft).unwrap();
    let source = Frame::new(frame_type, &[&yuyv[..]], None).unwrap();

    let mut copy = vec![0_u8; yuyv.len()];
    for flag in [ConversionFlag::Mirrored, ConversionFlag::FlippedAndMirrored] {
        let mut target = FrameMut::new(frame_type, vec![&mut copy[..]], None).unwrap();
        check_err(
            convert_frame(&source, &mut target, flag, None).unwrap_err(),
            ErrorKind::InvalidOperation,
        );
    }
    assert!(copy.iter().all(|&byte| byte == 0));

    let mut target = FrameMut::new(frame_type, vec![&mut copy[..]], None).unwrap();
    convert_frame(&source, &mut target, ConversionFlag::Flipped, None).unwrap();
    drop(target);
    assert_eq!(copy, orient(&yuyv, 2, 2, 4, ConversionFlag::Flipped));
}

#[test]
fn supported_conversions() {
    let frame_type = |pixel_format| {
        FrameType::new(4, 2, pixel_format, PixelOrigin::UpperLeft).unwrap()
    };

    for (source, target) in [
        (PixelFormat::Y_UV12_FULL_RANGE, PixelFormat::YUV24),
        (PixelFormat::Y_UV12_FULL_RANGE, PixelFormat::Y_U_V12_FULL_RANGE),
        (PixelFormat::Y_VU12_FULL_RANGE, PixelFormat::YVU24),
        (PixelFormat::Y_U_V12_FULL_RANGE, PixelFormat::Y_UV12_FULL_RANGE),
        (PixelFormat::Y_U_V12_FULL_RANGE, PixelFormat::Y8),
        (PixelFormat::Y10_PACKED, PixelFormat::BGR24),
        (PixelFormat::RGB24, PixelFormat::Y_UV12_FULL_RANGE),
        (PixelFormat::F64, PixelFormat::F64),
    ] {
        assert!(is_supported(&frame_type(source), target), "{source} > {target}");
    }

    for (source, target) in [
        (PixelFormat::RGB24, PixelFormat::F32),
        (PixelFormat::RGB24, PixelFormat::YUYV16),
        (PixelFormat::Y8, PixelFormat::UNDEFINED),
        (PixelFormat::YUYV16, PixelFormat::Y_UV12),
    ] {
        assert!(!is_supported(&frame_type(source), target), "{source} > {target}");
    }
}

#[test]
fn full_range_frames_share_the_limited_range_layout() {
    const WIDTH: u32 = 8;
    const HEIGHT: u32 = 4;
    let w = WIDTH as usize;
    let h = HEIGHT as usize;
    let y = random_plane(w, h, 0);
    let uv = random_plane(w, h / 2, 0);

    let source_type =
        FrameType::new(WIDTH, HEIGHT, PixelFormat::Y_UV12_FULL_RANGE, PixelOrigin::UpperLeft)
            .unwrap();
    let target_type =
        FrameType::new(WIDTH, HEIGHT, PixelFormat::YUV24, PixelOrigin::UpperLeft).unwrap();
    let source = Frame::new(source_type, &[&y[..], &uv[..]], None).unwrap();
    let mut yuv = vec![0_u8; 3 * w * h];
    let mut target = FrameMut::new(target_type, vec![&mut yuv[..]], None).unwrap();
    convert_frame(&source, &mut target, ConversionFlag::Mirrored, None).unwrap();
    drop(target);

    let mut expected = vec![0_u8; 3 * w * h];
    converters::convert_y_uv12_to_yuv24(
        &y,
        &uv,
        &mut expected,
        WIDTH,
        HEIGHT,
        ConversionFlag::Mirrored,
        0,
        0,
        0,
        None,
    )
    .unwrap();
    assert_eq!(yuv, expected);
}
