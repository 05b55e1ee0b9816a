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

use common::{add_padding, max_difference, orient, random_plane, strip_padding};
use fc::{convert_frame, converters, get_buffers_size, is_supported, ConversionFlag, ErrorKind};
use fc::{Frame, FrameMut, FrameType, PixelFormat, PixelOrigin, Worker, MAX_NUMBER_OF_PLANES};
use frame_converter as fc;
use itertools::iproduct;
use rand::Rng;

const FLAGS: [ConversionFlag; 4] = ConversionFlag::ALL;

fn rgb24_yuv24_round_trip() {
    const MAX_WIDTH: u32 = 34;
    const MAX_HEIGHT: u32 = 6;

    for (width, height, flag) in iproduct!(1..=MAX_WIDTH, 1..=MAX_HEIGHT, FLAGS) {
        let w = width as usize;
        let h = height as usize;

        let rgb = random_plane(3 * w, h, 0);
        let mut yuv = vec![0_u8; 3 * w * h];
        let mut back = vec![0_u8; 3 * w * h];

        converters::convert_rgb24_to_yuv24(&rgb, &mut yuv, width, height, flag, 0, 0, None)
            .unwrap();
        converters::convert_yuv24_to_rgb24(&yuv, &mut back, width, height, flag, 0, 0, None)
            .unwrap();

        assert!(
            max_difference(&rgb, &back) <= 2,
            "{width}x{height} {flag}"
        );
    }
}

/// Checks that every flag yields the oriented output of a `Normal` conversion
fn check_orientation<F>(
    width: u32,
    height: u32,
    source_elements: usize,
    target_channels: usize,
    convert: F,
) where
    F: Fn(&[u8], &mut [u8], ConversionFlag) -> Result<(), ErrorKind>,
{
    let w = width as usize;
    let h = height as usize;
    let source = random_plane(source_elements * w, h, 0);

    let mut normal = vec![0_u8; target_channels * w * h];
    convert(&source, &mut normal, ConversionFlag::Normal).unwrap();

    for flag in FLAGS {
        let mut target = vec![0_u8; target_channels * w * h];
        convert(&source, &mut target, flag).unwrap();
        assert_eq!(target, orient(&normal, w, h, target_channels, flag), "{flag}");
    }
}

fn single_plane_orientation() {
    for (width, height) in iproduct!([1_u32, 2, 7, 16, 31], [1_u32, 2, 5]) {
        check_orientation(width, height, 3, 3, |s, t, flag| {
            converters::convert_rgb24_to_yuv24(s, t, width, height, flag, 0, 0, None)
        });
        check_orientation(width, height, 3, 3, |s, t, flag| {
            converters::convert_rgb24_to_bgr24(s, t, width, height, flag, 0, 0, None)
        });
        check_orientation(width, height, 3, 4, |s, t, flag| {
            converters::convert_rgb24_to_argb32(s, t, width, height, flag, 0, 0, 255, None)
        });
        check_orientation(width, height, 3, 1, |s, t, flag| {
            converters::convert_rgb24_to_y8(s, t, width, height, flag, 0, 0, None)
        });
        check_orientation(width, height, 4, 3, |s, t, flag| {
            converters::convert_bgra32_to_rgb24(s, t, width, height, flag, 0, 0, None)
        });
        check_orientation(width, height, 3, 3, |s, t, flag| {
            converters::convert_yuv24_to_rgb24(s, t, width, height, flag, 0, 0, None)
        });
        check_orientation(width, height, 3, 4, |s, t, flag| {
            converters::convert_yuv24_to_bgra32_precision_6bit(
                s, t, width, height, flag, 0, 0, 255, None,
            )
        });
        check_orientation(width, height, 1, 3, |s, t, flag| {
            converters::convert_y8_to_rgb24(s, t, width, height, flag, 0, 0, None)
        });
    }
}

fn rgb24_to_y_uv12_orientation() {
    for (width, height) in iproduct!([2_u32, 6, 32, 34], [2_u32, 4, 10]) {
        let w = width as usize;
        let h = height as usize;
        let rgb = random_plane(3 * w, h, 0);

        let convert = |flag| {
            let mut y = vec![0_u8; w * h];
            let mut uv = vec![0_u8; w * h / 2];
            converters::convert_rgb24_to_y_uv12(
                &rgb, &mut y, &mut uv, width, height, flag, 0, 0, 0, None,
            )
            .unwrap();
            (y, uv)
        };

        let (y, uv) = convert(ConversionFlag::Normal);
        for flag in FLAGS {
            let (flag_y, flag_uv) = convert(flag);
            assert_eq!(flag_y, orient(&y, w, h, 1, flag), "{flag}");
            assert_eq!(flag_uv, orient(&uv, w / 2, h / 2, 2, flag), "{flag}");
        }
    }
}

fn y_uv12_to_rgb24_orientation() {
    for (width, height) in iproduct!([2_u32, 8, 30], [2_u32, 6]) {
        let w = width as usize;
        let h = height as usize;
        let y = random_plane(w, h, 0);
        let uv = random_plane(w, h / 2, 0);

        let convert = |flag| {
            let mut rgb = vec![0_u8; 3 * w * h];
            converters::convert_y_uv12_limited_range_to_rgb24(
                &y, &uv, &mut rgb, width, height, flag, 0, 0, 0, None,
            )
            .unwrap();
            rgb
        };

        let normal = convert(ConversionFlag::Normal);
        for flag in FLAGS {
            assert_eq!(convert(flag), orient(&normal, w, h, 3, flag), "{flag}");
        }
    }
}

fn rgb24_to_y_uv12_padding() {
    const WIDTH: u32 = 18;
    const HEIGHT: u32 = 6;
    const MAX_PAD: usize = 4;
    let w = WIDTH as usize;
    let h = HEIGHT as usize;

    for (source_pad, y_pad, uv_pad, flag) in
        iproduct!(0..MAX_PAD, 0..MAX_PAD, 0..MAX_PAD, FLAGS)
    {
        let padded_rgb = random_plane(3 * w, h, source_pad);
        let rgb = strip_padding(&padded_rgb, 3 * w, h, source_pad);

        let mut y = vec![0_u8; w * h];
        let mut uv = vec![0_u8; w * h / 2];
        converters::convert_rgb24_to_y_uv12(&rgb, &mut y, &mut uv, WIDTH, HEIGHT, flag, 0, 0, 0, None)
            .unwrap();

        let mut padded_y = vec![0_u8; (w + y_pad) * h];
        let mut padded_uv = vec![0_u8; (w + uv_pad) * h / 2];
        converters::convert_rgb24_to_y_uv12(
            &padded_rgb,
            &mut padded_y,
            &mut padded_uv,
            WIDTH,
            HEIGHT,
            flag,
            source_pad as u32,
            y_pad as u32,
            uv_pad as u32,
            None,
        )
        .unwrap();

        assert_eq!(strip_padding(&padded_y, w, h, y_pad), y);
        assert_eq!(strip_padding(&padded_uv, w, h / 2, uv_pad), uv);
    }
}

fn y_u_v12_to_bgra32_padding() {
    const WIDTH: u32 = 10;
    const HEIGHT: u32 = 4;
    const MAX_PAD: usize = 3;
    let w = WIDTH as usize;
    let h = HEIGHT as usize;

    for (y_pad, chroma_pad, target_pad) in iproduct!(0..MAX_PAD, 0..MAX_PAD, 0..MAX_PAD) {
        let padded_y = random_plane(w, h, y_pad);
        let padded_u = random_plane(w / 2, h / 2, chroma_pad);
        let padded_v = random_plane(w / 2, h / 2, chroma_pad);
        let y = strip_padding(&padded_y, w, h, y_pad);
        let u = strip_padding(&padded_u, w / 2, h / 2, chroma_pad);
        let v = strip_padding(&padded_v, w / 2, h / 2, chroma_pad);

        let mut bgra = vec![0_u8; 4 * w * h];
        converters::convert_y_u_v12_limited_range_to_bgra32(
            &y,
            &u,
            &v,
            &mut bgra,
            WIDTH,
            HEIGHT,
            ConversionFlag::Normal,
            0,
            0,
            0,
            0,
            255,
            None,
        )
        .unwrap();

        let mut padded_bgra = vec![0_u8; (4 * w + target_pad) * h];
        converters::convert_y_u_v12_limited_range_to_bgra32(
            &padded_y,
            &padded_u,
            &padded_v,
            &mut padded_bgra,
            WIDTH,
            HEIGHT,
            ConversionFlag::Normal,
            y_pad as u32,
            chroma_pad as u32,
            chroma_pad as u32,
            target_pad as u32,
            255,
            None,
        )
        .unwrap();

        assert_eq!(strip_padding(&padded_bgra, 4 * w, h, target_pad), bgra);
        assert!(bgra.chunks_exact(4).all(|pixel| pixel[3] == 255));
    }
}

fn worker_invariance() {
    const WIDTH: u32 = 64;
    const HEIGHT: u32 = 420;
    let w = WIDTH as usize;
    let h = HEIGHT as usize;

    let workers: Vec<Worker> = [1, 2, 8]
        .iter()
        .map(|threads| Worker::new(*threads).unwrap())
        .collect();
    let rgb = random_plane(3 * w, h, 0);
    let y = random_plane(w, h, 0);
    let uv = random_plane(w, h / 2, 0);

    for flag in [ConversionFlag::Normal, ConversionFlag::FlippedAndMirrored] {
        let mut expected_yuv = vec![0_u8; 3 * w * h];
        converters::convert_rgb24_to_yuv24(&rgb, &mut expected_yuv, WIDTH, HEIGHT, flag, 0, 0, None)
            .unwrap();

        let mut expected_y = vec![0_u8; w * h];
        let mut expected_uv = vec![0_u8; w * h / 2];
        converters::convert_rgb24_to_y_uv12(
            &rgb,
            &mut expected_y,
            &mut expected_uv,
            WIDTH,
            HEIGHT,
            flag,
            0,
            0,
            0,
            None,
        )
        .unwrap();

        let mut expected_rgb = vec![0_u8; 3 * w * h];
        converters::convert_y_uv12_limited_range_to_rgb24(
            &y,
            &uv,
            &mut expected_rgb,
            WIDTH,
            HEIGHT,
            flag,
            0,
            0,
            0,
            None,
        )
        .unwrap();

        for worker in &workers {
            let mut yuv = vec![0_u8; 3 * w * h];
            converters::convert_rgb24_to_yuv24(
                &rgb,
                &mut yuv,
                WIDTH,
                HEIGHT,
                flag,
                0,
                0,
                Some(worker),
            )
            .unwrap();
            assert_eq!(yuv, expected_yuv, "{} threads", worker.threads());

            let mut target_y = vec![0_u8; w * h];
            let mut target_uv = vec![0_u8; w * h / 2];
            converters::convert_rgb24_to_y_uv12(
                &rgb,
                &mut target_y,
                &mut target_uv,
                WIDTH,
                HEIGHT,
                flag,
                0,
                0,
                0,
                Some(worker),
            )
            .unwrap();
            assert_eq!(target_y, expected_y, "{} threads", worker.threads());
            assert_eq!(target_uv, expected_uv, "{} threads", worker.threads());

            let mut target_rgb = vec![0_u8; 3 * w * h];
            converters::convert_y_uv12_limited_range_to_rgb24(
                &y,
                &uv,
                &mut target_rgb,
                WIDTH,
                HEIGHT,
                flag,
                0,
                0,
                0,
                Some(worker),
            )
            .unwrap();
            assert_eq!(target_rgb, expected_rgb, "{} threads", worker.threads());
        }
    }
}

fn change_rgb24_to_bgr24_is_an_involution() {
    let worker = Worker::new(4).unwrap();
    let mut rng = rand::thread_rng();

    for (width, height, use_worker) in iproduct!([1_u32, 5, 64], [1_u32, 3, 250], [false, true]) {
        let w = width as usize;
        let h = height as usize;
        let padding = rng.gen_range(0..4_usize);
        let worker = if use_worker { Some(&worker) } else { None };

        let original = random_plane(3 * w, h, padding);
        let mut frame = original.clone();

        converters::change_rgb24_to_bgr24(&mut frame, width, height, padding as u32, worker)
            .unwrap();

        let mut expected = vec![0_u8; 3 * w * h];
        converters::convert_rgb24_to_bgr24(
            &original,
            &mut expected,
            width,
            height,
            ConversionFlag::Normal,
            padding as u32,
            0,
            None,
        )
        .unwrap();
        assert_eq!(strip_padding(&frame, 3 * w, h, padding), expected);

        converters::change_bgr24_to_rgb24(&mut frame, width, height, padding as u32, worker)
            .unwrap();
        converters::change_rgb24_to_bgr24(&mut frame, width, height, padding as u32, worker)
            .unwrap();
        converters::change_rgb24_to_bgr24(&mut frame, width, height, padding as u32, worker)
            .unwrap();
        assert_eq!(frame, original);
    }
}

fn uniform_block_chroma() {
    let rgb = [200_u8, 100, 50].repeat(16);
    let mut y = [0_u8; 16];
    let mut uv = [0_u8; 8];
    let mut vu = [0_u8; 8];
    let mut y_vu = [0_u8; 16];

    converters::convert_rgb24_to_y_uv12(&rgb, &mut y, &mut uv, 4, 4, ConversionFlag::Normal, 0, 0, 0, None)
        .unwrap();
    converters::convert_rgb24_to_y_vu12(&rgb, &mut y_vu, &mut vu, 4, 4, ConversionFlag::Normal, 0, 0, 0, None)
        .unwrap();

    let luma = (33 * 200 + 64 * 100 + 13 * 50 + 128 * 16 + 64) >> 7;
    let u = (4 * (-19 * 200 - 37 * 100 + 56 * 50) + 512 * 128 + 256) >> 9;
    let v = (4 * (56 * 200 - 47 * 100 - 9 * 50) + 512 * 128 + 256) >> 9;
    assert_eq!((luma, u, v), (123, 91, 175));

    assert!(y.iter().all(|value| i32::from(*value) == luma));
    assert_eq!(y_vu, y);
    assert_eq!(uv, [91, 175, 91, 175, 91, 175, 91, 175]);
    assert_eq!(vu, [175, 91, 175, 91, 175, 91, 175, 91]);
}

fn grey_levels_survive_yuv_to_rgb() {
    let y = [126_u8; 8];
    let uv = [128_u8; 4];
    let mut rgb = [0_u8; 24];
    converters::convert_y_uv12_limited_range_to_rgb24(
        &y,
        &uv,
        &mut rgb,
        4,
        2,
        ConversionFlag::Normal,
        0,
        0,
        0,
        None,
    )
    .unwrap();
    // 75 * (126 - 16) / 64, truncated
    assert!(rgb.iter().all(|value| *value == 128));

    let black = [16_u8; 8];
    let white = [235_u8; 8];
    converters::convert_y_uv12_limited_range_to_rgb24(
        &black, &uv, &mut rgb, 4, 2, ConversionFlag::Normal, 0, 0, 0, None,
    )
    .unwrap();
    assert!(rgb.iter().all(|value| *value == 0));
    converters::convert_y_uv12_limited_range_to_rgb24(
        &white, &uv, &mut rgb, 4, 2, ConversionFlag::Normal, 0, 0, 0, None,
    )
    .unwrap();
    assert!(rgb.iter().all(|value| *value == 255));
}

fn repacking_known_values() {
    // y_uv12 -> y_u_v12 -> yuv24
    let y = [1_u8, 2, 3, 4, 5, 6, 7, 8];
    let uv = [10_u8, 20, 30, 40];
    let mut planar = ([0_u8; 8], [0_u8; 2], [0_u8; 2]);
    converters::convert_y_uv12_to_y_u_v12(
        &y,
        &uv,
        &mut planar.0,
        &mut planar.1,
        &mut planar.2,
        4,
        2,
        ConversionFlag::Normal,
        0,
        0,
        0,
        0,
        0,
        None,
    )
    .unwrap();
    assert_eq!(planar, (y, [10, 30], [20, 40]));

    let mut yvu = [0_u8; 24];
    converters::convert_y_u_v12_to_yvu24(
        &planar.0,
        &planar.1,
        &planar.2,
        &mut yvu,
        4,
        2,
        ConversionFlag::Normal,
        0,
        0,
        0,
        0,
        None,
    )
    .unwrap();
    assert_eq!(&yvu[..6], &[1, 20, 10, 2, 20, 10]);
    assert_eq!(&yvu[18..], &[7, 40, 30, 8, 40, 30]);

    // yuv24 -> y_u_v12 averages each block, rounding
    let yuv = [
        9, 10, 100, 9, 11, 100, //
        9, 12, 100, 9, 14, 101,
    ];
    let (mut y, mut u, mut v) = ([0_u8; 4], [0_u8; 1], [0_u8; 1]);
    converters::convert_yuv24_to_y_u_v12(
        &yuv,
        &mut y,
        &mut u,
        &mut v,
        2,
        2,
        ConversionFlag::Normal,
        0,
        0,
        0,
        0,
        None,
    )
    .unwrap();
    assert_eq!((y, u, v), ([9; 4], [12], [100]));

    // yuyv16 -> yuv24 replicates chroma
    let yuyv = [16_u8, 100, 32, 200];
    let mut yuv = [0_u8; 6];
    converters::convert_yuyv16_to_yuv24(&yuyv, &mut yuv, 2, 1, ConversionFlag::Normal, 0, 0, None)
        .unwrap();
    assert_eq!(yuv, [16, 100, 200, 32, 100, 200]);

    // y8 -> rgba32 appends the channel value
    let mut rgba = [0_u8; 8];
    converters::convert_y8_to_rgba32(&[3, 4], &mut rgba, 2, 1, ConversionFlag::Mirrored, 0, 0, 9, None)
        .unwrap();
    assert_eq!(rgba, [4, 4, 4, 9, 3, 3, 3, 9]);
}

fn y10_packed_known_values() {
    // Four pixels: upper bits in the first four bytes, two low bits each in the fifth
    let packed = [0x80_u8, 0x01, 0xFF, 0x00, 0b1110_0100];
    let mut y8 = [0_u8; 4];
    let mut y10 = [0_u16; 4];
    let mut rgb = [0_u8; 12];

    converters::convert_y10_packed_to_y8(&packed, &mut y8, 4, 1, ConversionFlag::Normal, 0, 0, None)
        .unwrap();
    converters::convert_y10_packed_to_y10(&packed, &mut y10, 4, 1, ConversionFlag::Normal, 0, 0, None)
        .unwrap();
    converters::convert_y10_packed_to_rgb24(&packed, &mut rgb, 4, 1, ConversionFlag::Mirrored, 0, 0, None)
        .unwrap();

    assert_eq!(y8, [0x80, 0x01, 0xFF, 0x00]);
    assert_eq!(y10, [0x200, 0x005, 0x3FE, 0x003]);
    assert_eq!(rgb, [0, 0, 0, 0xFF, 0xFF, 0xFF, 0x01, 0x01, 0x01, 0x80, 0x80, 0x80]);
}

const FRAME_WIDTH: u32 = 12;
const FRAME_HEIGHT: u32 = 420;
const SOURCE_PADDING: [u32; MAX_NUMBER_OF_PLANES] = [3, 1, 2];
const TARGET_PADDING: [u32; MAX_NUMBER_OF_PLANES] = [2, 3, 1];
const NO_PADDING: [u32; MAX_NUMBER_OF_PLANES] = [0; MAX_NUMBER_OF_PLANES];

/// Visible bytes of each row of a plane, and bytes of each plane pixel
fn plane_bytes(frame_type: &FrameType, plane: usize) -> (usize, usize) {
    let layout = frame_type.plane_layout(plane as u32).unwrap();
    let element_bytes = frame_type.pixel_format().data_type().bytes();
    (
        layout.width_elements() * element_bytes,
        (layout.channels as usize) * element_bytes,
    )
}

/// Random planes of an unpadded frame
fn random_frame(frame_type: &FrameType) -> Vec<Vec<u8>> {
    let mut sizes = [0_usize; MAX_NUMBER_OF_PLANES];
    get_buffers_size(
        frame_type.width(),
        frame_type.height(),
        frame_type.pixel_format(),
        None,
        &mut sizes,
    )
    .unwrap();

    sizes[..frame_type.number_planes() as usize]
        .iter()
        .map(|size| random_plane(*size, 1, 0))
        .collect()
}

/// Runs `convert_frame` and returns the target planes without their padding
fn frame_conversion(
    (source_type, target_type): (&FrameType, &FrameType),
    source_planes: &[Vec<u8>],
    (source_padding, target_padding): ([u32; MAX_NUMBER_OF_PLANES], [u32; MAX_NUMBER_OF_PLANES]),
    flag: ConversionFlag,
    worker: Option<&Worker>,
) -> Result<Vec<Vec<u8>>, ErrorKind> {
    let padded: Vec<Vec<u8>> = source_planes
        .iter()
        .enumerate()
        .map(|(plane, data)| {
            let (row_bytes, _) = plane_bytes(source_type, plane);
            let stride = source_type
                .stride_bytes(plane as u32, source_padding[plane])
                .unwrap();
            let rows = data.len() / row_bytes;
            add_padding(data, row_bytes, rows, stride - row_bytes)
        })
        .collect();
    let planes: Vec<&[u8]> = padded.iter().map(Vec::as_slice).collect();
    let source = Frame::new(*source_type, &planes, Some(&source_padding[..]))?;

    let mut sizes = [0_usize; MAX_NUMBER_OF_PLANES];
    get_buffers_size(
        target_type.width(),
        target_type.height(),
        target_type.pixel_format(),
        Some(&target_padding[..]),
        &mut sizes,
    )?;
    let sizes = &sizes[..target_type.number_planes() as usize];

    // 16 bit storage keeps 16 bit targets aligned
    let mut buffers: Vec<Vec<u16>> = sizes.iter().map(|size| vec![0_u16; (size + 1) / 2]).collect();
    {
        let planes: Vec<&mut [u8]> = buffers
            .iter_mut()
            .zip(sizes)
            .map(|(buffer, size)| &mut bytemuck::cast_slice_mut::<u16, u8>(buffer)[..*size])
            .collect();
        let mut target = FrameMut::new(*target_type, planes, Some(&target_padding[..]))?;
        convert_frame(&source, &mut target, flag, worker)?;
    }

    Ok(buffers
        .iter()
        .zip(sizes)
        .enumerate()
        .map(|(plane, (buffer, size))| {
            let (row_bytes, _) = plane_bytes(target_type, plane);
            let stride = target_type
                .stride_bytes(plane as u32, target_padding[plane])
                .unwrap();
            let bytes = &bytemuck::cast_slice::<u16, u8>(buffer)[..*size];
            strip_padding(bytes, row_bytes, size / stride, stride - row_bytes)
        })
        .collect())
}

/// Formats whose pixels cannot be mirrored one plane pixel at a time
fn mirrors_as_a_whole(pixel_format: PixelFormat) -> bool {
    [
        PixelFormat::YUYV16,
        PixelFormat::UYVY16,
        PixelFormat::Y10_PACKED,
        PixelFormat::BGGR10_PACKED,
        PixelFormat::RGGB10_PACKED,
    ]
    .contains(&pixel_format)
}

fn every_frame_conversion() {
    let worker = Worker::new(8).unwrap();
    let mut pairs = 0;

    for (source_format, target_format) in
        iproduct!(PixelFormat::PREDEFINED.iter(), PixelFormat::PREDEFINED.iter())
    {
        let new_type = |pixel_format: PixelFormat| {
            FrameType::new(FRAME_WIDTH, FRAME_HEIGHT, pixel_format, PixelOrigin::UpperLeft)
                .unwrap()
        };
        let source_type = new_type(*source_format);
        if !is_supported(&source_type, *target_format) {
            continue;
        }

        pairs += 1;
        let target_type = new_type(*target_format);
        let types = (&source_type, &target_type);
        let source = random_frame(&source_type);
        let pair = format!("{source_format} > {target_format}");

        let normal = frame_conversion(
            types,
            &source,
            (NO_PADDING, NO_PADDING),
            ConversionFlag::Normal,
            None,
        )
        .unwrap();

        for flag in FLAGS {
            let result =
                frame_conversion(types, &source, (NO_PADDING, NO_PADDING), flag, None);
            if flag.is_mirrored() && mirrors_as_a_whole(*target_format) {
                assert_eq!(result, Err(ErrorKind::InvalidOperation), "{pair} {flag}");
                continue;
            }

            let result = result.unwrap();
            for (plane, (oriented, reference)) in result.iter().zip(&normal).enumerate() {
                let (row_bytes, pixel_bytes) = plane_bytes(&target_type, plane);
                let rows = reference.len() / row_bytes;
                let expected = orient(reference, row_bytes / pixel_bytes, rows, pixel_bytes, flag);
                assert!(*oriented == expected, "{pair} {flag} plane {plane}");
            }
        }

        let parallel = frame_conversion(
            types,
            &source,
            (NO_PADDING, NO_PADDING),
            ConversionFlag::Normal,
            Some(&worker),
        )
        .unwrap();
        assert!(parallel == normal, "{pair} with worker");

        let padded = frame_conversion(
            types,
            &source,
            (SOURCE_PADDING, TARGET_PADDING),
            ConversionFlag::Normal,
            None,
        )
        .unwrap();
        assert!(padded == normal, "{pair} with padding");
    }

    // Self copies plus the registered conversions
    assert!(pairs > PixelFormat::PREDEFINED.len() * 2, "{pairs} pairs");
}

#[cfg(all(test, not(feature = "test_instruction_sets")))]
mod conversions {
    use super::*;

    #[test]
    fn rgb24_to_yuv24_and_back() {
        rgb24_yuv24_round_trip();
    }

    #[test]
    fn flags_on_single_plane() {
        single_plane_orientation();
    }

    #[test]
    fn flags_on_rgb24_to_y_uv12() {
        rgb24_to_y_uv12_orientation();
    }

    #[test]
    fn flags_on_y_uv12_to_rgb24() {
        y_uv12_to_rgb24_orientation();
    }

    #[test]
    fn padding_on_rgb24_to_y_uv12() {
        rgb24_to_y_uv12_padding();
    }

    #[test]
    fn padding_on_y_u_v12_to_bgra32() {
        y_u_v12_to_bgra32_padding();
    }

    #[test]
    fn workers() {
        worker_invariance();
    }

    #[test]
    fn change_in_place() {
        change_rgb24_to_bgr24_is_an_involution();
    }

    #[test]
    fn chroma_of_uniform_block() {
        uniform_block_chroma();
    }

    #[test]
    fn grey_levels() {
        grey_levels_survive_yuv_to_rgb();
    }

    #[test]
    fn repacking() {
        repacking_known_values();
    }

    #[test]
    fn y10_packed() {
        y10_packed_known_values();
    }

    #[test]
    fn all_frame_conversions() {
        every_frame_conversion();
    }
}

#[cfg(all(test, feature = "test_instruction_sets"))]
mod conversions {
    use super::*;
    use fc::initialize_with_instruction_set;

    #[test]
    fn coverage() {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        const SETS: [&str; 2] = ["x86", "sse2"];
        #[cfg(target_arch = "aarch64")]
        const SETS: [&str; 2] = ["x86", "neon"];
        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
        const SETS: [&str; 1] = ["x86"];

        for set in &SETS {
            initialize_with_instruction_set(set);

            rgb24_yuv24_round_trip();
            single_plane_orientation();
            worker_invariance();
            every_frame_conversion();
        }
    }

    #[test]
    fn accelerated_rows_match_scalar_rows() {
        const WIDTH: u32 = 67;
        const HEIGHT: u32 = 5;
        let w = WIDTH as usize;
        let h = HEIGHT as usize;
        let rgb = random_plane(3 * w, h, 0);

        let convert = |set: &str| {
            initialize_with_instruction_set(set);
            let mut yuv = vec![0_u8; 3 * w * h];
            converters::convert_rgb24_to_yuv24(
                &rgb,
                &mut yuv,
                WIDTH,
                HEIGHT,
                ConversionFlag::Normal,
                0,
                0,
                None,
            )
            .unwrap();
            yuv
        };

        let scalar = convert("x86");
        let accelerated = convert("native");
        assert_eq!(scalar, accelerated);
    }
}
