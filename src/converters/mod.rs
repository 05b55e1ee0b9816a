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
//! Named conversions between predefined pixel formats.
//!
//! Every function follows the same convention: source planes, target planes, width,
//! height, conversion flag, padding of each source plane, padding of each target
//! plane (in elements), an optional constant channel value and an optional worker.
//!
//! Dimensions must be non zero and satisfy the width and height multiples of both
//! pixel formats, otherwise [`InvalidValue`] is returned. Planes shorter than their
//! stride times their height yield [`NotEnoughData`]. Nothing is written when an
//! error is returned.
//!
//! [`InvalidValue`]: ../enum.ErrorKind.html#variant.InvalidValue
//! [`NotEnoughData`]: ../enum.ErrorKind.html#variant.NotEnoughData

/// Defines a conversion between two single plane pixel formats that runs through
/// the generic row engine.
macro_rules! single_plane_conversion {
    (
        $(#[$attr:meta])*
        $name:ident: $source_format:ident -> $target_format:ident,
        $row_function:expr, $target_channels:literal, $options:expr, channel_value
    ) => {
        $(#[$attr])*
        pub fn $name(
            source: &[u8],
            target: &mut [u8],
            width: u32,
            height: u32,
            flag: $crate::conversion_flag::ConversionFlag,
            source_padding_elements: u32,
            target_padding_elements: u32,
            channel_value: u8,
            worker: Option<&$crate::worker::Worker>,
        ) -> Result<(), $crate::ErrorKind> {
            $crate::converters::convert_single_plane(
                source,
                target,
                width,
                height,
                flag,
                (
                    $crate::pixel_format::PixelFormat::$source_format,
                    $crate::pixel_format::PixelFormat::$target_format,
                ),
                (source_padding_elements, target_padding_elements),
                $row_function,
                $crate::convert_image::x86::reverse_row_pixel_order_in_place::<u8, $target_channels>,
                &$options.with_channel_value(channel_value),
                worker,
            )
        }
    };
    (
        $(#[$attr:meta])*
        $name:ident: $source_format:ident -> $target_format:ident,
        $row_function:expr, $target_channels:literal, $options:expr
    ) => {
        $(#[$attr])*
        pub fn $name(
            source: &[u8],
            target: &mut [u8],
            width: u32,
            height: u32,
            flag: $crate::conversion_flag::ConversionFlag,
            source_padding_elements: u32,
            target_padding_elements: u32,
            worker: Option<&$crate::worker::Worker>,
        ) -> Result<(), $crate::ErrorKind> {
            $crate::converters::convert_single_plane(
                source,
                target,
                width,
                height,
                flag,
                (
                    $crate::pixel_format::PixelFormat::$source_format,
                    $crate::pixel_format::PixelFormat::$target_format,
                ),
                (source_padding_elements, target_padding_elements),
                $row_function,
                $crate::convert_image::x86::reverse_row_pixel_order_in_place::<u8, $target_channels>,
                &$options,
                worker,
            )
        }
    };
}

/// Defines a conversion from a two plane 4:2:0 format into a single plane format
macro_rules! semi_planar_conversion {
    (
        $(#[$attr:meta])*
        $name:ident: $source_format:ident [y, $chroma:ident] -> $target_format:ident,
        $kernel:expr, $options:expr $(, $channel_value:ident)?
    ) => {
        paste::paste! {
            $(#[$attr])*
            pub fn $name(
                y_source: &[u8],
                [<$chroma _source>]: &[u8],
                target: &mut [u8],
                width: u32,
                height: u32,
                flag: $crate::conversion_flag::ConversionFlag,
                y_source_padding_elements: u32,
                [<$chroma _source_padding_elements>]: u32,
                target_padding_elements: u32,
                $($channel_value: u8,)?
                worker: Option<&$crate::worker::Worker>,
            ) -> Result<(), $crate::ErrorKind> {
                $crate::converters::convert_planes(
                    &[y_source, [<$chroma _source>]],
                    &mut [target],
                    width,
                    height,
                    flag,
                    (
                        $crate::pixel_format::PixelFormat::$source_format,
                        $crate::pixel_format::PixelFormat::$target_format,
                    ),
                    &[
                        y_source_padding_elements,
                        [<$chroma _source_padding_elements>],
                        target_padding_elements,
                    ],
                    &$kernel,
                    &$options $(.with_channel_value($channel_value))?,
                    worker,
                )
            }
        }
    };
}

/// Defines a conversion from a three plane 4:2:0 format into a single plane format
macro_rules! planar_conversion {
    (
        $(#[$attr:meta])*
        $name:ident: $source_format:ident [y, $first:ident, $second:ident] -> $target_format:ident,
        $kernel:expr, $options:expr $(, $channel_value:ident)?
    ) => {
        paste::paste! {
            $(#[$attr])*
            pub fn $name(
                y_source: &[u8],
                [<$first _source>]: &[u8],
                [<$second _source>]: &[u8],
                target: &mut [u8],
                width: u32,
                height: u32,
                flag: $crate::conversion_flag::ConversionFlag,
                y_source_padding_elements: u32,
                [<$first _source_padding_elements>]: u32,
                [<$second _source_padding_elements>]: u32,
                target_padding_elements: u32,
                $($channel_value: u8,)?
                worker: Option<&$crate::worker::Worker>,
            ) -> Result<(), $crate::ErrorKind> {
                $crate::converters::convert_planes(
                    &[y_source, [<$first _source>], [<$second _source>]],
                    &mut [target],
                    width,
                    height,
                    flag,
                    (
                        $crate::pixel_format::PixelFormat::$source_format,
                        $crate::pixel_format::PixelFormat::$target_format,
                    ),
                    &[
                        y_source_padding_elements,
                        [<$first _source_padding_elements>],
                        [<$second _source_padding_elements>],
                        target_padding_elements,
                    ],
                    &$kernel,
                    &$options $(.with_channel_value($channel_value))?,
                    worker,
                )
            }
        }
    };
}

mod bgr24;
mod bgra32;
mod rgb24;
mod rgba32;
mod y10_packed;
mod y8;
mod y_u_v12;
mod y_uv12;
mod y_vu12;
mod yuv24;
mod yuyv16;

pub use self::bgr24::*;
pub use self::bgra32::*;
pub use self::rgb24::*;
pub use self::rgba32::*;
pub use self::y10_packed::*;
pub use self::y8::*;
pub use self::y_u_v12::*;
pub use self::y_uv12::*;
pub use self::y_vu12::*;
pub use self::yuv24::*;
pub use self::yuyv16::*;

use crate::conversion_flag::ConversionFlag;
use crate::convert_image::generic::{self, PlaneShape, ReverseFunction, RowFunction, RowsKernel};
use crate::convert_image::x86;
use crate::frame::{Frame, FrameMut, FrameType, PixelOrigin};
use crate::options::{ConversionOptions, MAX_CONVERSION_PLANES};
use crate::pixel_format::{PixelFormat, MAX_NUMBER_OF_PLANES};
use crate::worker::Worker;
use crate::ErrorKind;

// Plane shapes shared by the row pair kernels
pub(crate) const LUMA_ROW_PAIR: PlaneShape = PlaneShape::full(1, 2);
pub(crate) const INTERLEAVED_CHROMA_ROW: PlaneShape = PlaneShape::half(2, 1);
pub(crate) const CHROMA_ROW: PlaneShape = PlaneShape::half(1, 1);

fn frame_type(width: u32, height: u32, pixel_format: PixelFormat) -> Result<FrameType, ErrorKind> {
    FrameType::new(width, height, pixel_format, PixelOrigin::UpperLeft)
}

/// Returns the stride of a plane in bytes, once its buffer is known to be large enough
fn check_plane(
    frame_type: &FrameType,
    plane: usize,
    length: usize,
    padding_elements: u32,
) -> Result<usize, ErrorKind> {
    let plane = u32::try_from(plane).map_err(|_| ErrorKind::InvalidValue)?;
    let stride = frame_type
        .stride_bytes(plane, padding_elements)
        .ok_or(ErrorKind::InvalidValue)?;
    let required = frame_type
        .plane_bytes(plane, padding_elements)
        .ok_or(ErrorKind::InvalidValue)?;

    if length < required {
        return Err(ErrorKind::NotEnoughData);
    }

    Ok(stride)
}

/// Validates a conversion between two single plane 8 bit formats and runs it row by row
pub(crate) fn convert_single_plane(
    source: &[u8],
    target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    (source_format, target_format): (PixelFormat, PixelFormat),
    (source_padding_elements, target_padding_elements): (u32, u32),
    row_function: RowFunction<u8, u8>,
    reverse_function: ReverseFunction<u8>,
    options: &ConversionOptions,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    let source_type = frame_type(width, height, source_format)?;
    let target_type = frame_type(width, height, target_format)?;
    let source_stride = check_plane(&source_type, 0, source.len(), source_padding_elements)?;
    let target_stride = check_plane(&target_type, 0, target.len(), target_padding_elements)?;

    generic::convert_generic_pixel_format(
        source,
        target,
        width,
        height,
        source_stride,
        target_stride,
        flag,
        row_function,
        reverse_function,
        source_padding_elements == 0 && target_padding_elements == 0,
        options,
        worker,
    );

    Ok(())
}

/// Copies the luma plane of a multi plane (or packed 4:2:2) format into a Y8 frame.
///
/// `CH` is the number of interleaved elements per pixel of the luma plane, luma
/// being the first of them.
pub(crate) fn convert_luma_plane<const CH: usize>(
    sources: &[&[u8]],
    target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    source_format: PixelFormat,
    source_padding_elements: &[u32],
    target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    let source_type = frame_type(width, height, source_format)?;
    let target_type = frame_type(width, height, PixelFormat::Y8)?;
    if sources.len() != source_type.number_planes() as usize
        || source_padding_elements.len() != sources.len()
    {
        return Err(ErrorKind::InvalidValue);
    }

    let mut source_stride = 0;
    for (plane, (buffer, padding)) in sources.iter().zip(source_padding_elements).enumerate() {
        let stride = check_plane(&source_type, plane, buffer.len(), *padding)?;
        if plane == 0 {
            source_stride = stride;
        }
    }

    let target_stride = check_plane(&target_type, 0, target.len(), target_padding_elements)?;
    let [luma, ..] = sources else {
        return Err(ErrorKind::InvalidValue);
    };

    generic::convert_generic_pixel_format(
        luma,
        target,
        width,
        height,
        source_stride,
        target_stride,
        flag,
        x86::shuffle_row_channels::<CH, 1, 0>,
        x86::reverse_row_pixel_order_in_place::<u8, 1>,
        source_padding_elements[0] == 0 && target_padding_elements == 0,
        &ConversionOptions::default(),
        worker,
    );

    Ok(())
}

/// Validates a conversion between any two formats and runs it one group of rows at
/// a time.
///
/// `padding_elements` holds the padding of the source planes then of the target
/// planes. A kernel without source planes converts `targets` in place.
pub(crate) fn convert_planes(
    sources: &[&[u8]],
    targets: &mut [&mut [u8]],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    (source_format, target_format): (PixelFormat, PixelFormat),
    padding_elements: &[u32],
    kernel: &RowsKernel,
    options: &ConversionOptions,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    let source_type = frame_type(width, height, source_format)?;
    let target_type = frame_type(width, height, target_format)?;

    let source_planes = sources.len();
    if source_planes != kernel.sources.len()
        || targets.len() != kernel.targets.len()
        || padding_elements.len() != source_planes + targets.len()
        || padding_elements.len() > MAX_CONVERSION_PLANES
        || height % kernel.image_rows_per_iteration != 0
    {
        return Err(ErrorKind::InvalidValue);
    }

    for (plane, buffer) in sources.iter().enumerate() {
        check_plane(&source_type, plane, buffer.len(), padding_elements[plane])?;
    }

    for (plane, buffer) in targets.iter().enumerate() {
        check_plane(
            &target_type,
            plane,
            buffer.len(),
            padding_elements[source_planes + plane],
        )?;
    }

    generic::convert_arbitrary_pixel_format(
        sources,
        targets,
        width,
        height,
        flag,
        kernel,
        &options.with_padding_elements(padding_elements),
        worker,
    );

    Ok(())
}

/// Returns whether every plane of the format can be mirrored one plane pixel at a time
fn mirrors_per_plane(pixel_format: PixelFormat) -> bool {
    pixel_format.generic_channels() != 0
        || matches!(
            pixel_format,
            PixelFormat::Y_UV12
                | PixelFormat::Y_VU12
                | PixelFormat::Y_U_V12
                | PixelFormat::Y_V_U12
                | PixelFormat::Y_UV12_FULL_RANGE
                | PixelFormat::Y_VU12_FULL_RANGE
                | PixelFormat::Y_U_V12_FULL_RANGE
                | PixelFormat::Y_V_U12_FULL_RANGE
                | PixelFormat::Y_U_V24
                | PixelFormat::Y_U_V24_FULL_RANGE
        )
}

/// Copies a frame into a frame with the same pixel format and size, plane by plane.
///
/// Formats whose plane pixels cannot be moved independently only support
/// `Normal` and `Flipped`.
pub(crate) fn copy_frame(
    source: &Frame,
    target: &mut FrameMut,
    flag: ConversionFlag,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    let source_type = *source.frame_type();
    let target_type = *target.frame_type();
    let pixel_format = source_type.pixel_format();
    if pixel_format != target_type.pixel_format()
        || source_type.width() != target_type.width()
        || source_type.height() != target_type.height()
    {
        return Err(ErrorKind::InvalidValue);
    }

    if flag.is_mirrored() && !mirrors_per_plane(pixel_format) {
        return Err(ErrorKind::InvalidOperation);
    }

    let element_bytes = pixel_format.data_type().bytes();
    let target_padding: [u32; MAX_NUMBER_OF_PLANES] =
        core::array::from_fn(|plane| target.padding_elements(plane));

    let mut strides = [(0, 0); MAX_NUMBER_OF_PLANES];
    for (plane, (source_plane, target_plane)) in
        source.planes().iter().zip(target.planes()).enumerate()
    {
        strides[plane] = (
            check_plane(&source_type, plane, source_plane.len(), source.padding_elements(plane))?,
            check_plane(&target_type, plane, target_plane.len(), target_padding[plane])?,
        );
    }

    for (plane, (source_plane, target_plane)) in
        source.planes().iter().zip(target.planes_mut()).enumerate()
    {
        let layout = source_type
            .plane_layout(plane as u32)
            .ok_or(ErrorKind::InvalidValue)?;

        generic::copy_plane(
            source_plane,
            target_plane,
            layout.width_elements() * element_bytes,
            layout.height,
            strides[plane],
            flag,
            (layout.channels as usize) * element_bytes,
            worker,
        );
    }

    Ok(())
}
