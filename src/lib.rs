#![doc(test(attr(allow(explicit_builtin_cfgs_in_flags))))]
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
#![warn(missing_docs)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unstable_features)]
#![deny(unused_import_braces)]
#![deny(
    clippy::complexity,
    clippy::correctness,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]
#![allow(
    clippy::too_many_arguments, // API design
    clippy::missing_safety_doc, // Until we add them...
    clippy::similar_names, // This requires effort to ensure
    clippy::inline_always,
    // Yield false positives
    clippy::must_use_candidate,
    // Fixed point kernels narrow and reinterpret on purpose
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
)]

//! Frame converter is a library to convert raw image frames between pixel formats.
//!
//! It converts between the following predefined pixel formats:
//!
//! | Source pixel format  | Target pixel formats                                                  |
//! | -------------------- | --------------------------------------------------------------------- |
//! | RGB24                | ARGB32, BGR24, BGRA32, RGB24, RGBA32, Y8, YUV24, Y_UV12, Y_UV12_FULL_RANGE, Y_VU12, Y_U_V12, Y_V_U12 |
//! | BGR24                | BGR24, BGRA32, RGB24, RGBA32, Y8, YUV24, Y_UV12                       |
//! | RGBA32               | BGR24, BGRA32, RGB24, RGBA32, Y8, YUV24, Y_UV12                       |
//! | BGRA32               | BGR24, RGB24, RGBA32, Y8                                              |
//! | YUV24                | BGR24, BGRA32, RGB24, Y8, YUV24, YVU24, Y_U_V12                       |
//! | Y8                   | BGR24, RGB24, RGBA32, Y8                                              |
//! | Y_UV12               | BGR24, RGB24, Y8, YUV24, YVU24, Y_U_V12                               |
//! | Y_VU12               | BGR24, RGB24, Y8, YUV24, YVU24                                        |
//! | Y_U_V12              | BGR24, BGRA32, RGB24, RGBA32, Y8, YUV24, YVU24, Y_UV12, Y_U_V12       |
//! | Y_UV12_FULL_RANGE    | BGR24, RGB24, Y8, YUV24, YVU24, Y_U_V12_FULL_RANGE                    |
//! | Y_VU12_FULL_RANGE    | Y8, YUV24, YVU24                                                      |
//! | Y_U_V12_FULL_RANGE   | RGB24, Y8, YUV24, YVU24, Y_UV12_FULL_RANGE, Y_U_V12_FULL_RANGE        |
//! | YUYV16               | BGR24, RGB24, Y8, YUV24                                               |
//! | Y10_PACKED           | BGR24, RGB24, Y8, Y10                                                 |
//!
//! [`convert_frame`] also copies a frame into any frame of the same pixel format.
//!
//! YUV formats use ITU-R Recommendation BT.601, limited range (16-235) unless the
//! pixel format is marked as full range (0-255).
//!
//! Every conversion can flip (upside down) and mirror (left to right) the image at the
//! same time, can read and write rows with padding at their end and can split its work
//! across the threads of a [`Worker`].
//!
//! # Examples
//!
//! Convert an image from rgb24 to y_uv12, using the named conversion:
//! ```
//! use frame_converter as fc;
//! use fc::{converters, ConversionFlag};
//!
//! fn convert() -> Result<(), fc::ErrorKind> {
//!     const WIDTH: u32 = 640;
//!     const HEIGHT: u32 = 480;
//!
//!     let source = vec![0u8; 3 * (WIDTH as usize) * (HEIGHT as usize)];
//!     let mut y = vec![0u8; (WIDTH as usize) * (HEIGHT as usize)];
//!     let mut uv = vec![0u8; (WIDTH as usize) * (HEIGHT as usize) / 2];
//!
//!     converters::convert_rgb24_to_y_uv12(
//!         &source,
//!         &mut y,
//!         &mut uv,
//!         WIDTH,
//!         HEIGHT,
//!         ConversionFlag::Normal,
//!         0,
//!         0,
//!         0,
//!         None,
//!     )
//! }
//! # convert().unwrap();
//! ```
//!
//! Split the work across four threads and flip the image:
//! ```
//! use frame_converter as fc;
//! use fc::{converters, ConversionFlag, Worker};
//! use std::error;
//!
//! fn convert() -> Result<(), Box<dyn error::Error>> {
//!     const WIDTH: u32 = 1920;
//!     const HEIGHT: u32 = 1080;
//!
//!     let worker = Worker::new(4)?;
//!     let source = vec![0u8; 3 * (WIDTH as usize) * (HEIGHT as usize)];
//!     let mut target = vec![0u8; 3 * (WIDTH as usize) * (HEIGHT as usize)];
//!
//!     converters::convert_rgb24_to_yuv24(
//!         &source,
//!         &mut target,
//!         WIDTH,
//!         HEIGHT,
//!         ConversionFlag::Flipped,
//!         0,
//!         0,
//!         Some(&worker),
//!     )?;
//!
//!     Ok(())
//! }
//! # convert().unwrap();
//! ```
//!
//! Convert between frames, letting the library pick the conversion:
//! ```
//! use frame_converter as fc;
//! use fc::{convert_frame, get_buffers_size, ConversionFlag, Frame, FrameMut, FrameType};
//! use fc::{PixelFormat, PixelOrigin};
//! use std::error;
//!
//! fn convert() -> Result<(), Box<dyn error::Error>> {
//!     const WIDTH: u32 = 640;
//!     const HEIGHT: u32 = 480;
//!
//!     let source_type = FrameType::new(WIDTH, HEIGHT, PixelFormat::Y_UV12, PixelOrigin::UpperLeft)?;
//!     let target_type = FrameType::new(WIDTH, HEIGHT, PixelFormat::BGR24, PixelOrigin::LowerLeft)?;
//!
//!     let sizes = &mut [0usize; 2];
//!     get_buffers_size(WIDTH, HEIGHT, PixelFormat::Y_UV12, None, sizes)?;
//!     let y = vec![0u8; sizes[0]];
//!     let uv = vec![128u8; sizes[1]];
//!
//!     get_buffers_size(WIDTH, HEIGHT, PixelFormat::BGR24, None, sizes)?;
//!     let mut bgr = vec![0u8; sizes[0]];
//!
//!     let source = Frame::new(source_type, &[&y[..], &uv[..]], None)?;
//!     let mut target = FrameMut::new(target_type, vec![&mut bgr[..]], None)?;
//!
//!     // Pixel origins differ: the image is flipped on the way
//!     convert_frame(&source, &mut target, ConversionFlag::Normal, None)?;
//!
//!     Ok(())
//! }
//! # convert().unwrap();
//! ```
mod conversion_flag;
mod convert_image;
mod cpu_info;
mod dispatcher;
mod frame;
mod options;
mod pixel_format;
mod static_assert;
mod value_range;
mod worker;

pub mod converters;

use convert_image::common::DEFAULT_ALPHA;
use convert_image::generic::RowFunction;
use convert_image::x86;
use cpu_info::{CpuManufacturer, InstructionSet};
use log::debug;
use paste::paste;
use std::error;
use std::fmt;
#[cfg(feature = "test_instruction_sets")]
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::OnceLock;

pub use conversion_flag::ConversionFlag;
pub use frame::{Frame, FrameMut, FrameType, PixelOrigin};
pub use options::ConversionOptions;
pub use pixel_format::{DataType, PixelFormat, PlaneLayout, MAX_NUMBER_OF_PLANES};
pub use value_range::ValueRange;
pub use worker::Worker;

/// An enumeration of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub enum ErrorKind {
    /// One or more parameters have invalid values for the called function
    InvalidValue,
    /// The combination of parameters is unsupported for the called function
    InvalidOperation,
    /// Not enough data was provided to the called function. Typically, provided
    /// buffers are shorter than the image they should hold
    NotEnoughData,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::InvalidValue => write!(
                f,
                "One or more parameters have not legal values for the command"
            ),
            ErrorKind::InvalidOperation => write!(
                f,
                "The combination of parameters is not legal for the command"
            ),
            ErrorKind::NotEnoughData => write!(f, "Not enough data provided"),
        }
    }
}

#[cfg(not(tarpaulin_include))]
impl error::Error for ErrorKind {
    fn cause(&self) -> Option<&dyn error::Error> {
        None
    }
}

/// Converts the planes of a frame into the planes of another frame
type FrameConverter =
    fn(&Frame, &mut FrameMut, ConversionFlag, Option<&Worker>) -> Result<(), ErrorKind>;

type DispatchTable = [Option<FrameConverter>; dispatcher::TABLE_SIZE];

/// Registers a named conversion in the dispatch table.
///
/// Plane names only build the argument lists, the order is the pixel format one.
/// The same conversion can be registered for several formats sharing a layout.
/// A trailing `DEFAULT_ALPHA` passes the opaque alpha to conversions that append a channel.
macro_rules! frame_converter {
    (
        $table:ident, $function:ident,
        $source_format:ident [$($source:ident),+] -> $target_format:ident [$($target:ident),+]
        $(, $channel_value:ident)?
    ) => {
        paste! {
            fn [<frame_ $source_format:lower _to_ $target_format:lower>](
                source: &Frame,
                target: &mut FrameMut,
                flag: ConversionFlag,
                worker: Option<&Worker>,
            ) -> Result<(), ErrorKind> {
                let width = source.frame_type().width();
                let height = source.frame_type().height();
                let source_padding: [u32; MAX_NUMBER_OF_PLANES] =
                    core::array::from_fn(|plane| source.padding_elements(plane));
                let target_padding: [u32; MAX_NUMBER_OF_PLANES] =
                    core::array::from_fn(|plane| target.padding_elements(plane));
                let [$([<source_ $source _padding>],)+ ..] = source_padding;
                let [$([<target_ $target _padding>],)+ ..] = target_padding;

                let [$([<source_ $source>]),+] = source.planes() else {
                    return Err(ErrorKind::InvalidValue);
                };
                let [$([<target_ $target>]),+] = target.planes_mut() else {
                    return Err(ErrorKind::InvalidValue);
                };

                converters::$function(
                    $([<source_ $source>],)+
                    $([<target_ $target>],)+
                    width,
                    height,
                    flag,
                    $([<source_ $source _padding>],)+
                    $([<target_ $target _padding>],)+
                    $($channel_value,)?
                    worker,
                )
            }

            if let Some(index) = dispatcher::get_conversion_index(
                PixelFormat::$source_format,
                PixelFormat::$target_format,
            ) {
                $table[index] = Some([<frame_ $source_format:lower _to_ $target_format:lower>]);
            }
        }
    };
}

/// Y10 stores 16 bit elements, the target plane is reinterpreted before converting
fn frame_y10_packed_to_y10(
    source: &Frame,
    target: &mut FrameMut,
    flag: ConversionFlag,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    let width = source.frame_type().width();
    let height = source.frame_type().height();
    let source_padding = source.padding_elements(0);
    let target_padding = target.padding_elements(0);

    let [source_plane] = source.planes() else {
        return Err(ErrorKind::InvalidValue);
    };
    let [target_plane] = target.planes_mut() else {
        return Err(ErrorKind::InvalidValue);
    };
    let target_plane: &mut [u16] =
        bytemuck::try_cast_slice_mut(&mut target_plane[..]).map_err(|_| ErrorKind::InvalidValue)?;

    converters::convert_y10_packed_to_y10(
        source_plane,
        target_plane,
        width,
        height,
        flag,
        source_padding,
        target_padding,
        worker,
    )
}

#[allow(clippy::items_after_statements, clippy::too_many_lines)]
fn fill_dispatch_table(table: &mut DispatchTable) {
    frame_converter!(table, convert_rgb24_to_bgr24, RGB24 [rgb] -> BGR24 [bgr]);
    frame_converter!(table, convert_rgb24_to_rgb24, RGB24 [rgb] -> RGB24 [rgb]);
    frame_converter!(table, convert_rgb24_to_rgba32, RGB24 [rgb] -> RGBA32 [rgba], DEFAULT_ALPHA);
    frame_converter!(table, convert_rgb24_to_bgra32, RGB24 [rgb] -> BGRA32 [bgra], DEFAULT_ALPHA);
    frame_converter!(table, convert_rgb24_to_argb32, RGB24 [rgb] -> ARGB32 [argb], DEFAULT_ALPHA);
    frame_converter!(table, convert_rgb24_to_y8, RGB24 [rgb] -> Y8 [y]);
    frame_converter!(table, convert_rgb24_to_yuv24, RGB24 [rgb] -> YUV24 [yuv]);
    frame_converter!(table, convert_rgb24_to_y_uv12, RGB24 [rgb] -> Y_UV12 [y, uv]);
    frame_converter!(table, convert_rgb24_to_y_vu12, RGB24 [rgb] -> Y_VU12 [y, vu]);
    frame_converter!(table, convert_rgb24_to_y_uv12_full_range, RGB24 [rgb] -> Y_UV12_FULL_RANGE [y, uv]);
    frame_converter!(table, convert_rgb24_to_y_u_v12, RGB24 [rgb] -> Y_U_V12 [y, u, v]);
    frame_converter!(table, convert_rgb24_to_y_v_u12, RGB24 [rgb] -> Y_V_U12 [y, v, u]);

    frame_converter!(table, convert_bgr24_to_rgb24, BGR24 [bgr] -> RGB24 [rgb]);
    frame_converter!(table, convert_bgr24_to_bgr24, BGR24 [bgr] -> BGR24 [bgr]);
    frame_converter!(table, convert_bgr24_to_bgra32, BGR24 [bgr] -> BGRA32 [bgra], DEFAULT_ALPHA);
    frame_converter!(table, convert_bgr24_to_rgba32, BGR24 [bgr] -> RGBA32 [rgba], DEFAULT_ALPHA);
    frame_converter!(table, convert_bgr24_to_y8, BGR24 [bgr] -> Y8 [y]);
    frame_converter!(table, convert_bgr24_to_yuv24, BGR24 [bgr] -> YUV24 [yuv]);
    frame_converter!(table, convert_bgr24_to_y_uv12, BGR24 [bgr] -> Y_UV12 [y, uv]);

    frame_converter!(table, convert_rgba32_to_rgb24, RGBA32 [rgba] -> RGB24 [rgb]);
    frame_converter!(table, convert_rgba32_to_bgr24, RGBA32 [rgba] -> BGR24 [bgr]);
    frame_converter!(table, convert_rgba32_to_rgba32, RGBA32 [rgba] -> RGBA32 [rgba]);
    frame_converter!(table, convert_rgba32_to_bgra32, RGBA32 [rgba] -> BGRA32 [bgra]);
    frame_converter!(table, convert_rgba32_to_y8, RGBA32 [rgba] -> Y8 [y]);
    frame_converter!(table, convert_rgba32_to_yuv24, RGBA32 [rgba] -> YUV24 [yuv]);
    frame_converter!(table, convert_rgba32_to_y_uv12, RGBA32 [rgba] -> Y_UV12 [y, uv]);

    frame_converter!(table, convert_bgra32_to_rgb24, BGRA32 [bgra] -> RGB24 [rgb]);
    frame_converter!(table, convert_bgra32_to_bgr24, BGRA32 [bgra] -> BGR24 [bgr]);
    frame_converter!(table, convert_bgra32_to_rgba32, BGRA32 [bgra] -> RGBA32 [rgba]);
    frame_converter!(table, convert_bgra32_to_y8, BGRA32 [bgra] -> Y8 [y]);

    frame_converter!(table, convert_yuv24_to_rgb24, YUV24 [yuv] -> RGB24 [rgb]);
    frame_converter!(table, convert_yuv24_to_bgr24, YUV24 [yuv] -> BGR24 [bgr]);
    frame_converter!(table, convert_yuv24_to_bgra32_precision_6bit, YUV24 [yuv] -> BGRA32 [bgra], DEFAULT_ALPHA);
    frame_converter!(table, convert_yuv24_to_y8, YUV24 [yuv] -> Y8 [y]);
    frame_converter!(table, convert_yuv24_to_yuv24, YUV24 [yuv] -> YUV24 [yuv]);
    frame_converter!(table, convert_yuv24_to_yvu24, YUV24 [yuv] -> YVU24 [yvu]);
    frame_converter!(table, convert_yuv24_to_y_u_v12, YUV24 [yuv] -> Y_U_V12 [y, u, v]);

    frame_converter!(table, convert_y8_to_y8, Y8 [y] -> Y8 [y]);
    frame_converter!(table, convert_y8_to_rgb24, Y8 [y] -> RGB24 [rgb]);
    frame_converter!(table, convert_y8_to_bgr24, Y8 [y] -> BGR24 [bgr]);
    frame_converter!(table, convert_y8_to_rgba32, Y8 [y] -> RGBA32 [rgba], DEFAULT_ALPHA);

    frame_converter!(table, convert_y_uv12_to_y8, Y_UV12 [y, uv] -> Y8 [y]);
    frame_converter!(table, convert_y_uv12_to_yuv24, Y_UV12 [y, uv] -> YUV24 [yuv]);
    frame_converter!(table, convert_y_uv12_to_yvu24, Y_UV12 [y, uv] -> YVU24 [yvu]);
    frame_converter!(table, convert_y_uv12_to_y_u_v12, Y_UV12 [y, uv] -> Y_U_V12 [y, u, v]);
    frame_converter!(table, convert_y_uv12_limited_range_to_rgb24, Y_UV12 [y, uv] -> RGB24 [rgb]);
    frame_converter!(table, convert_y_uv12_limited_range_to_bgr24, Y_UV12 [y, uv] -> BGR24 [bgr]);
    frame_converter!(table, convert_y_uv12_full_range_to_rgb24, Y_UV12_FULL_RANGE [y, uv] -> RGB24 [rgb]);
    frame_converter!(table, convert_y_uv12_full_range_to_bgr24, Y_UV12_FULL_RANGE [y, uv] -> BGR24 [bgr]);
    frame_converter!(table, convert_y_uv12_to_y8, Y_UV12_FULL_RANGE [y, uv] -> Y8 [y]);
    frame_converter!(table, convert_y_uv12_to_yuv24, Y_UV12_FULL_RANGE [y, uv] -> YUV24 [yuv]);
    frame_converter!(table, convert_y_uv12_to_yvu24, Y_UV12_FULL_RANGE [y, uv] -> YVU24 [yvu]);
    frame_converter!(table, convert_y_uv12_to_y_u_v12, Y_UV12_FULL_RANGE [y, uv] -> Y_U_V12_FULL_RANGE [y, u, v]);

    frame_converter!(table, convert_y_vu12_to_y8, Y_VU12 [y, vu] -> Y8 [y]);
    frame_converter!(table, convert_y_vu12_to_yuv24, Y_VU12 [y, vu] -> YUV24 [yuv]);
    frame_converter!(table, convert_y_vu12_to_yvu24, Y_VU12 [y, vu] -> YVU24 [yvu]);
    frame_converter!(table, convert_y_vu12_limited_range_to_rgb24, Y_VU12 [y, vu] -> RGB24 [rgb]);
    frame_converter!(table, convert_y_vu12_limited_range_to_bgr24, Y_VU12 [y, vu] -> BGR24 [bgr]);
    frame_converter!(table, convert_y_vu12_to_y8, Y_VU12_FULL_RANGE [y, vu] -> Y8 [y]);
    frame_converter!(table, convert_y_vu12_to_yuv24, Y_VU12_FULL_RANGE [y, vu] -> YUV24 [yuv]);
    frame_converter!(table, convert_y_vu12_to_yvu24, Y_VU12_FULL_RANGE [y, vu] -> YVU24 [yvu]);

    frame_converter!(table, convert_y_u_v12_to_y8, Y_U_V12 [y, u, v] -> Y8 [y]);
    frame_converter!(table, convert_y_u_v12_to_yuv24, Y_U_V12 [y, u, v] -> YUV24 [yuv]);
    frame_converter!(table, convert_y_u_v12_to_yvu24, Y_U_V12 [y, u, v] -> YVU24 [yvu]);
    frame_converter!(table, convert_y_u_v12_to_y_uv12, Y_U_V12 [y, u, v] -> Y_UV12 [y, uv]);
    frame_converter!(table, convert_y_u_v12_to_y_u_v12, Y_U_V12 [y, u, v] -> Y_U_V12 [y, u, v]);
    frame_converter!(table, convert_y_u_v12_limited_range_to_rgb24, Y_U_V12 [y, u, v] -> RGB24 [rgb]);
    frame_converter!(table, convert_y_u_v12_limited_range_to_bgr24, Y_U_V12 [y, u, v] -> BGR24 [bgr]);
    frame_converter!(table, convert_y_u_v12_limited_range_to_rgba32, Y_U_V12 [y, u, v] -> RGBA32 [rgba], DEFAULT_ALPHA);
    frame_converter!(table, convert_y_u_v12_limited_range_to_bgra32, Y_U_V12 [y, u, v] -> BGRA32 [bgra], DEFAULT_ALPHA);
    frame_converter!(table, convert_y_u_v12_full_range_to_rgb24, Y_U_V12_FULL_RANGE [y, u, v] -> RGB24 [rgb]);
    frame_converter!(table, convert_y_u_v12_to_y8, Y_U_V12_FULL_RANGE [y, u, v] -> Y8 [y]);
    frame_converter!(table, convert_y_u_v12_to_yuv24, Y_U_V12_FULL_RANGE [y, u, v] -> YUV24 [yuv]);
    frame_converter!(table, convert_y_u_v12_to_yvu24, Y_U_V12_FULL_RANGE [y, u, v] -> YVU24 [yvu]);
    frame_converter!(table, convert_y_u_v12_to_y_uv12, Y_U_V12_FULL_RANGE [y, u, v] -> Y_UV12_FULL_RANGE [y, uv]);
    frame_converter!(table, convert_y_u_v12_to_y_u_v12, Y_U_V12_FULL_RANGE [y, u, v] -> Y_U_V12_FULL_RANGE [y, u, v]);

    frame_converter!(table, convert_yuyv16_to_y8, YUYV16 [yuyv] -> Y8 [y]);
    frame_converter!(table, convert_yuyv16_to_yuv24, YUYV16 [yuyv] -> YUV24 [yuv]);
    frame_converter!(table, convert_yuyv16_to_rgb24, YUYV16 [yuyv] -> RGB24 [rgb]);
    frame_converter!(table, convert_yuyv16_to_bgr24, YUYV16 [yuyv] -> BGR24 [bgr]);

    frame_converter!(table, convert_y10_packed_to_y8, Y10_PACKED [y] -> Y8 [y]);
    frame_converter!(table, convert_y10_packed_to_rgb24, Y10_PACKED [y] -> RGB24 [rgb]);
    frame_converter!(table, convert_y10_packed_to_bgr24, Y10_PACKED [y] -> BGR24 [bgr]);
    if let Some(index) = dispatcher::get_conversion_index(PixelFormat::Y10_PACKED, PixelFormat::Y10)
    {
        table[index] = Some(frame_y10_packed_to_y10);
    }
}

#[cfg(feature = "test_instruction_sets")]
static TEST_SET: AtomicI32 = AtomicI32::new(-1);

struct Context {
    manufacturer: CpuManufacturer,
    set: InstructionSet,
    rgb24_to_yuv24: RowFunction<u8, u8>,
    converters: DispatchTable,
}

impl Context {
    pub fn global() -> &'static Context {
        static INSTANCE: OnceLock<Context> = OnceLock::new();
        INSTANCE.get_or_init(Context::new)
    }

    pub fn new() -> Self {
        let (manufacturer, set) = cpu_info::get();
        let rgb24_to_yuv24: RowFunction<u8, u8> = match set {
            #[cfg(all(
                any(target_arch = "x86", target_arch = "x86_64"),
                target_feature = "sse2"
            ))]
            InstructionSet::Sse2 => convert_image::sse2::convert_row_rgb24_to_yuv24,
            #[cfg(target_arch = "aarch64")]
            InstructionSet::Neon => convert_image::neon::convert_row_rgb24_to_yuv24,
            _ => x86::convert_row_precision_7bit::<3, 3>,
        };

        let mut context = Context {
            manufacturer,
            set,
            rgb24_to_yuv24,
            converters: [None; dispatcher::TABLE_SIZE],
        };
        fill_dispatch_table(&mut context.converters);

        debug!(
            "frame converter context: manufacturer {:?}, instruction set {}",
            context.manufacturer,
            context.set.name()
        );
        context
    }
}

/// Row kernel for RGB24 to YUV24, accelerated when the cpu allows it
pub(crate) fn rgb24_to_yuv24_row_function() -> RowFunction<u8, u8> {
    #[cfg(feature = "test_instruction_sets")]
    if TEST_SET.load(Ordering::SeqCst) == 0 {
        return x86::convert_row_precision_7bit::<3, 3>;
    }

    Context::global().rgb24_to_yuv24
}

/// Returns a description of the algorithms that are best for the running cpu and
/// available instruction sets
///
/// # Examples
/// ```
/// use frame_converter as fc;
/// println!("{}", fc::describe_acceleration());
/// // => {cpu-manufacturer:Intel,instruction-set:Sse2}
/// ```
pub fn describe_acceleration() -> String {
    let state = Context::global();

    format!(
        "{{cpu-manufacturer:{:?},instruction-set:{:?}}}",
        state.manufacturer, state.set
    )
}

/// Compute number of bytes required to store an image given its pixel format,
/// dimensions and optionally the padding at the end of the rows of each plane
///
/// # Arguments
/// * `width` - Width of the image in pixels
/// * `height` - Height of the image in pixels
/// * `pixel_format` - Pixel format of the image
/// * `padding_elements` - Padding at the end of each row of each plane, in elements
///   of the pixel format data type
/// * `buffers_size` - An array receiving the minimum number of bytes required in each
///   image plane
///
/// # Examples
/// Compute how many bytes are needed to store a y_uv12 image whose luma rows are padded:
/// ```
/// use frame_converter as fc;
/// use fc::{get_buffers_size, PixelFormat};
/// use std::error;
///
/// fn compute_size() -> Result<(), Box<dyn error::Error>> {
///     const WIDTH: u32 = 640;
///     const HEIGHT: u32 = 480;
///
///     let sizes: &mut [usize] = &mut [0usize; 2];
///     get_buffers_size(WIDTH, HEIGHT, PixelFormat::Y_UV12, Some(&[16, 0]), sizes)?;
///     assert_eq!(sizes[0], 656 * 480);
///     assert_eq!(sizes[1], 640 * 240);
///
///     Ok(())
/// }
/// # compute_size().unwrap();
/// ```
///
/// # Errors
///
/// * [`InvalidValue`] if the pixel format is undefined, if `width` or `height`
///   violate the multiples required by the pixel format, or if a plane size
///   overflows `usize`
///
/// * [`NotEnoughData`] if `buffers_size` has fewer entries than the pixel format
///   has planes
///
/// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
/// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
pub fn get_buffers_size(
    width: u32,
    height: u32,
    pixel_format: PixelFormat,
    padding_elements: Option<&[u32]>,
    buffers_size: &mut [usize],
) -> Result<(), ErrorKind> {
    if pixel_format == PixelFormat::UNDEFINED || !pixel_format.is_valid_size(width, height) {
        return Err(ErrorKind::InvalidValue);
    }

    pixel_format::get_buffers_size(
        pixel_format,
        width,
        height,
        padding_elements.unwrap_or(&[]),
        buffers_size,
    )
}

/// Converts a frame into another one with a different pixel format.
///
/// The conversion is picked from the pixel formats of both frames, see the table in
/// the [crate documentation](index.html). Frames sharing a pixel format with no
/// dedicated conversion are copied plane by plane. When the pixel origins of the
/// frames differ the image is flipped on top of what `flag` requests.
///
/// # Errors
///
/// * [`InvalidValue`] if the frames have different dimensions
///
/// * [`InvalidOperation`] if there is no conversion between the two pixel formats, or
///   if a copy into the same pixel format is mirrored on a format that cannot be
///   mirrored plane by plane, see [`is_supported`]
///
/// * Any error of the named conversion, see the [`converters`] module
///
/// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
/// [`InvalidOperation`]: ./enum.ErrorKind.html#variant.InvalidOperation
/// [`converters`]: ./converters/index.html
pub fn convert_frame(
    source: &Frame,
    target: &mut FrameMut,
    flag: ConversionFlag,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    let source_type = source.frame_type();
    let target_type = target.frame_type();
    if source_type.width() != target_type.width() || source_type.height() != target_type.height()
    {
        return Err(ErrorKind::InvalidValue);
    }

    let flag = if source_type.pixel_origin() == target_type.pixel_origin() {
        flag
    } else {
        flag.toggle_flip()
    };

    let source_format = source_type.pixel_format();
    let target_format = target_type.pixel_format();
    match lookup_converter(source_format, target_format) {
        Some(frame_converter) => frame_converter(source, target, flag, worker),
        None if source_format == target_format => {
            converters::copy_frame(source, target, flag, worker)
        }
        None => Err(ErrorKind::InvalidOperation),
    }
}

fn lookup_converter(source: PixelFormat, target: PixelFormat) -> Option<FrameConverter> {
    let index = dispatcher::get_conversion_index(source, target)?;
    Context::global().converters.get(index).copied().flatten()
}

/// Returns whether [`convert_frame`] converts frames of the given type into frames
/// with the given pixel format.
///
/// Frames are always convertible into their own pixel format. Mirroring such a copy
/// is refused by formats whose pixels straddle bytes (`Y10_PACKED`, packed Bayer
/// formats) or share chroma samples in one plane (`YUYV16`, `UYVY16`).
///
/// # Examples
/// ```
/// use frame_converter as fc;
/// use fc::{is_supported, FrameType, PixelFormat, PixelOrigin};
///
/// let frame_type = FrameType::new(640, 480, PixelFormat::Y_UV12, PixelOrigin::UpperLeft).unwrap();
/// assert!(is_supported(&frame_type, PixelFormat::RGB24));
/// assert!(is_supported(&frame_type, PixelFormat::Y_UV12));
/// assert!(!is_supported(&frame_type, PixelFormat::F32));
/// ```
pub fn is_supported(source_type: &FrameType, target_pixel_format: PixelFormat) -> bool {
    let source = source_type.pixel_format();
    target_pixel_format != PixelFormat::UNDEFINED
        && (source == target_pixel_format || lookup_converter(source, target_pixel_format).is_some())
}

/// This is for internal use only
#[cfg(feature = "test_instruction_sets")]
pub fn initialize_with_instruction_set(instruction_set: &str) {
    match instruction_set {
        "x86" => TEST_SET.store(0, Ordering::SeqCst),
        _ => TEST_SET.store(-1, Ordering::SeqCst),
    };
}
