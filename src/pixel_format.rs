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
use crate::value_range::ValueRange;
use crate::ErrorKind;
use core::fmt;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Largest number of memory planes of a pixel format
pub const MAX_NUMBER_OF_PLANES: usize = 3;

const BIT_OFFSET_CHANNELS: u32 = 16;
const BIT_OFFSET_DATA_TYPE: u32 = BIT_OFFSET_CHANNELS + 8;
const BIT_OFFSET_PLANES: u32 = BIT_OFFSET_DATA_TYPE + 8;
const BIT_OFFSET_WIDTH_MULTIPLE: u32 = BIT_OFFSET_PLANES + 8;
const BIT_OFFSET_HEIGHT_MULTIPLE: u32 = BIT_OFFSET_WIDTH_MULTIPLE + 8;

const ID_MASK: u64 = 0xFFFF;
const BYTE_MASK: u64 = 0xFF;

/// An enumeration of the elementary data types a pixel format can be made of.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DataType {
    /// Undefined data type
    Undefined = 0,
    /// Unsigned 8 bit integer
    UnsignedInteger8,
    /// Signed 8 bit integer
    SignedInteger8,
    /// Unsigned 16 bit integer
    UnsignedInteger16,
    /// Signed 16 bit integer
    SignedInteger16,
    /// Unsigned 32 bit integer
    UnsignedInteger32,
    /// Signed 32 bit integer
    SignedInteger32,
    /// Unsigned 64 bit integer
    UnsignedInteger64,
    /// Signed 64 bit integer
    SignedInteger64,
    /// Half precision float
    SignedFloat16,
    /// Single precision float
    SignedFloat32,
    /// Double precision float
    SignedFloat64,
}

impl DataType {
    const ALL: [DataType; 12] = [
        DataType::Undefined,
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

    /// Number of bytes of one element, 0 for `Undefined`
    pub const fn bytes(self) -> usize {
        match self {
            DataType::Undefined => 0,
            DataType::UnsignedInteger8 | DataType::SignedInteger8 => 1,
            DataType::UnsignedInteger16 | DataType::SignedInteger16 | DataType::SignedFloat16 => 2,
            DataType::UnsignedInteger32 | DataType::SignedInteger32 | DataType::SignedFloat32 => 4,
            DataType::UnsignedInteger64 | DataType::SignedInteger64 | DataType::SignedFloat64 => 8,
        }
    }

    fn from_bits(bits: u64) -> DataType {
        // Out of range values decode as undefined
        DataType::ALL
            .get(bits as usize)
            .copied()
            .unwrap_or(DataType::Undefined)
    }
}

/// Size of one plane of an image
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlaneLayout {
    /// Width of the plane, in pixels of the plane
    pub width: u32,
    /// Height of the plane, in rows
    pub height: u32,
    /// Number of interleaved channels in each pixel of the plane
    pub channels: u32,
}

impl PlaneLayout {
    /// Number of elements in one row, padding excluded
    pub const fn width_elements(&self) -> usize {
        (self.width as usize) * (self.channels as usize)
    }
}

/// A pixel format.
///
/// The value packs the predefined format identifier together with the data type,
/// number of channels, number of planes and the size constraints of the format:
///
/// bits    | meaning
/// --------|----------------------------------------------
/// 0..16   | predefined identifier (0 for generic formats)
/// 16..24  | channels (0 for non generic formats)
/// 24..32  | data type
/// 32..40  | planes
/// 40..48  | width multiple
/// 48..56  | height multiple
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PixelFormat(u64);

const fn encode(
    id: u64,
    data_type: DataType,
    channels: u32,
    planes: u32,
    width_multiple: u32,
    height_multiple: u32,
) -> u64 {
    id | ((channels as u64) << BIT_OFFSET_CHANNELS)
        | ((data_type as u64) << BIT_OFFSET_DATA_TYPE)
        | ((planes as u64) << BIT_OFFSET_PLANES)
        | ((width_multiple as u64) << BIT_OFFSET_WIDTH_MULTIPLE)
        | ((height_multiple as u64) << BIT_OFFSET_HEIGHT_MULTIPLE)
}

/// Declares the predefined pixel formats and their name table
///
/// Each entry is: name, identifier, data type, generic channels (0 if the layout
/// is not a plain interleaved one), planes, width multiple, height multiple
macro_rules! predefined_pixel_formats {
    ($(
        $(#[$attr:meta])*
        $name:ident = ($id:expr, $dt:ident, $ch:expr, $planes:expr, $wm:expr, $hm:expr),
    )*) => {
        impl PixelFormat {
            $(
                $(#[$attr])*
                pub const $name: PixelFormat =
                    PixelFormat(encode($id, DataType::$dt, $ch, $planes, $wm, $hm));
            )*

            /// All the predefined pixel formats, aliases excluded
            pub const PREDEFINED: &'static [PixelFormat] = &[$(PixelFormat::$name,)*];

            fn predefined_name(self) -> Option<&'static str> {
                match self {
                    $(PixelFormat::$name => Some(stringify!($name)),)*
                    _ => None,
                }
            }
        }
    };
}

predefined_pixel_formats! {
    /// Alpha, blue, green, red, 32 bits per pixel
    ABGR32 = (1, UnsignedInteger8, 4, 1, 1, 1),
    /// Alpha, red, green, blue, 32 bits per pixel
    ARGB32 = (2, UnsignedInteger8, 4, 1, 1, 1),
    /// Blue, green, red, 24 bits per pixel
    BGR24 = (3, UnsignedInteger8, 3, 1, 1, 1),
    /// Blue, green, red and one unused byte, 32 bits per pixel
    BGR32 = (4, UnsignedInteger8, 4, 1, 1, 1),
    /// Blue, green, red, alpha, 32 bits per pixel
    BGRA32 = (8, UnsignedInteger8, 4, 1, 1, 1),
    /// Bayer mosaic (blue first) with 10 bit values, 4 pixels packed into 5 bytes
    BGGR10_PACKED = (10, UnsignedInteger8, 0, 1, 4, 2),
    /// Red, green, blue, 24 bits per pixel
    RGB24 = (11, UnsignedInteger8, 3, 1, 1, 1),
    /// Red, green, blue and one unused byte, 32 bits per pixel
    RGB32 = (12, UnsignedInteger8, 4, 1, 1, 1),
    /// Red, green, blue, alpha, 32 bits per pixel
    RGBA32 = (16, UnsignedInteger8, 4, 1, 1, 1),
    /// Bayer mosaic (red first) with 10 bit values, 4 pixels packed into 5 bytes
    RGGB10_PACKED = (19, UnsignedInteger8, 0, 1, 4, 2),
    /// Luma plane, then U plane, then V plane; chroma subsampled 2x2, limited range
    Y_U_V12 = (20, UnsignedInteger8, 0, 3, 2, 2),
    /// Interleaved Y, U, V, 24 bits per pixel
    YUV24 = (21, UnsignedInteger8, 3, 1, 1, 1),
    /// Interleaved Y, U, V, alpha, 32 bits per pixel
    YUVA32 = (22, UnsignedInteger8, 4, 1, 1, 1),
    /// Luma plane, then V plane, then U plane; chroma subsampled 2x2, limited range
    Y_V_U12 = (24, UnsignedInteger8, 0, 3, 2, 2),
    /// Interleaved Y, V, U, 24 bits per pixel
    YVU24 = (25, UnsignedInteger8, 3, 1, 1, 1),
    /// Luma plane, then one interleaved UV plane subsampled 2x2, limited range
    Y_UV12 = (26, UnsignedInteger8, 0, 2, 2, 2),
    /// Luma plane, then one interleaved VU plane subsampled 2x2, limited range
    Y_VU12 = (27, UnsignedInteger8, 0, 2, 2, 2),
    /// Packed 4:2:2, Y U Y V per pixel pair
    YUYV16 = (28, UnsignedInteger8, 0, 1, 2, 1),
    /// Packed 4:2:2, U Y V Y per pixel pair
    UYVY16 = (29, UnsignedInteger8, 0, 1, 2, 1),
    /// Luma, 8 bits per pixel, full range
    Y8 = (30, UnsignedInteger8, 1, 1, 1, 1),
    /// Luma with 10 bit values stored in 16 bits
    Y10 = (31, UnsignedInteger16, 1, 1, 1, 1),
    /// Luma with 10 bit values, 4 pixels packed into 5 bytes
    Y10_PACKED = (32, UnsignedInteger8, 0, 1, 4, 1),
    /// Luma, 16 bits per pixel
    Y16 = (33, UnsignedInteger16, 1, 1, 1, 1),
    /// Luma and alpha, 16 bits per pixel
    YA16 = (36, UnsignedInteger8, 2, 1, 1, 1),
    /// Three full resolution planes Y, U, V, limited range
    Y_U_V24 = (39, UnsignedInteger8, 0, 3, 1, 1),
    /// Three full resolution planes Y, U, V, full range
    Y_U_V24_FULL_RANGE = (40, UnsignedInteger8, 0, 3, 1, 1),
    /// Luma, 8 bits per pixel, limited range
    Y8_LIMITED_RANGE = (41, UnsignedInteger8, 1, 1, 1, 1),
    /// Same layout as `Y_UV12`, full range
    Y_UV12_FULL_RANGE = (42, UnsignedInteger8, 0, 2, 2, 2),
    /// Same layout as `Y_VU12`, full range
    Y_VU12_FULL_RANGE = (43, UnsignedInteger8, 0, 2, 2, 2),
    /// Same layout as `Y_U_V12`, full range
    Y_U_V12_FULL_RANGE = (44, UnsignedInteger8, 0, 3, 2, 2),
    /// Same layout as `Y_V_U12`, full range
    Y_V_U12_FULL_RANGE = (45, UnsignedInteger8, 0, 3, 2, 2),
    /// One single precision float channel
    F32 = (46, SignedFloat32, 1, 1, 1, 1),
    /// One double precision float channel
    F64 = (47, SignedFloat64, 1, 1, 1, 1),
}

impl PixelFormat {
    /// Sentinel for unknown or invalid pixel formats
    pub const UNDEFINED: PixelFormat = PixelFormat(0);

    /// Alias of `Y8`
    pub const Y8_FULL_RANGE: PixelFormat = PixelFormat::Y8;
    /// Alias of `Y_UV12`
    pub const Y_UV12_LIMITED_RANGE: PixelFormat = PixelFormat::Y_UV12;
    /// Alias of `Y_VU12`
    pub const Y_VU12_LIMITED_RANGE: PixelFormat = PixelFormat::Y_VU12;
    /// Alias of `Y_U_V12`
    pub const Y_U_V12_LIMITED_RANGE: PixelFormat = PixelFormat::Y_U_V12;
    /// Alias of `Y_V_U12`
    pub const Y_V_U12_LIMITED_RANGE: PixelFormat = PixelFormat::Y_V_U12;
    /// Alias of `Y_U_V24`
    pub const Y_U_V24_LIMITED_RANGE: PixelFormat = PixelFormat::Y_U_V24;

    /// Builds a generic pixel format, i.e. one made of interleaved channels of
    /// the same data type.
    ///
    /// Returns `UNDEFINED` if any of the values does not fit its bit field.
    pub const fn generic(
        data_type: DataType,
        channels: u32,
        planes: u32,
        width_multiple: u32,
        height_multiple: u32,
    ) -> PixelFormat {
        if matches!(data_type, DataType::Undefined)
            || channels == 0
            || channels > 255
            || planes == 0
            || planes > 255
            || width_multiple == 0
            || width_multiple > 255
            || height_multiple == 0
            || height_multiple > 255
        {
            return PixelFormat::UNDEFINED;
        }

        PixelFormat(encode(
            0,
            data_type,
            channels,
            planes,
            width_multiple,
            height_multiple,
        ))
    }

    /// Raw value of the pixel format
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Predefined identifier, 0 for generic formats
    pub const fn id(self) -> u32 {
        (self.0 & ID_MASK) as u32
    }

    /// Returns whether the pixel format is made of interleaved channels of one data type
    pub const fn is_generic(self) -> bool {
        self.generic_channels() != 0
            && self.number_planes() == 1
            && ((self.0 >> BIT_OFFSET_DATA_TYPE) & BYTE_MASK) != 0
    }

    /// Returns whether the format is a pure generic one, with no predefined identifier
    pub const fn is_pure_generic(self) -> bool {
        self.id() == 0 && self.is_generic()
    }

    /// Strips the predefined identifier, e.g. `RGB24` becomes the generic 3 channel
    /// 8 bit format. Non generic formats return `UNDEFINED`.
    pub const fn to_generic(self) -> PixelFormat {
        if self.is_generic() {
            PixelFormat(self.0 & !ID_MASK)
        } else {
            PixelFormat::UNDEFINED
        }
    }

    /// Number of interleaved channels as stored in memory, 0 for non generic formats
    pub const fn generic_channels(self) -> u32 {
        ((self.0 >> BIT_OFFSET_CHANNELS) & BYTE_MASK) as u32
    }

    /// Total number of channels.
    ///
    /// Formats storing three channels into four bytes (`RGB32`, `BGR32`) report four.
    /// Planar and subsampled YUV formats report three, `Y10_PACKED` reports one.
    pub fn channels(self) -> u32 {
        match self.generic_channels() {
            0 => match self {
                PixelFormat::UNDEFINED => 0,
                PixelFormat::Y10_PACKED => 1,
                _ => 3,
            },
            channels => channels,
        }
    }

    /// Data type of each element
    pub fn data_type(self) -> DataType {
        DataType::from_bits((self.0 >> BIT_OFFSET_DATA_TYPE) & BYTE_MASK)
    }

    /// Number of memory planes
    pub const fn number_planes(self) -> u32 {
        ((self.0 >> BIT_OFFSET_PLANES) & BYTE_MASK) as u32
    }

    /// Number of pixels the image width must be a multiple of
    pub const fn width_multiple(self) -> u32 {
        ((self.0 >> BIT_OFFSET_WIDTH_MULTIPLE) & BYTE_MASK) as u32
    }

    /// Number of pixels the image height must be a multiple of
    pub const fn height_multiple(self) -> u32 {
        ((self.0 >> BIT_OFFSET_HEIGHT_MULTIPLE) & BYTE_MASK) as u32
    }

    /// Returns whether an image of the given size can be stored with this format
    pub fn is_valid_size(self, width: u32, height: u32) -> bool {
        let width_multiple = self.width_multiple();
        let height_multiple = self.height_multiple();

        width != 0
            && height != 0
            && width_multiple != 0
            && height_multiple != 0
            && width % width_multiple == 0
            && height % height_multiple == 0
    }

    /// Value range of YUV family formats carrying one
    pub fn value_range(self) -> Option<ValueRange> {
        match self {
            PixelFormat::Y8
            | PixelFormat::Y_UV12_FULL_RANGE
            | PixelFormat::Y_VU12_FULL_RANGE
            | PixelFormat::Y_U_V12_FULL_RANGE
            | PixelFormat::Y_V_U12_FULL_RANGE
            | PixelFormat::Y_U_V24_FULL_RANGE => Some(ValueRange::Full),
            PixelFormat::Y8_LIMITED_RANGE
            | PixelFormat::Y_UV12
            | PixelFormat::Y_VU12
            | PixelFormat::Y_U_V12
            | PixelFormat::Y_V_U12
            | PixelFormat::Y_U_V24 => Some(ValueRange::Limited),
            _ => None,
        }
    }

    /// Layout of one plane of an image with this format.
    ///
    /// Returns `None` if the plane does not exist, if the image size violates the
    /// format constraints or if a row holds more than `u32::MAX` elements.
    pub fn plane_layout(self, width: u32, height: u32, plane: u32) -> Option<PlaneLayout> {
        if plane >= self.number_planes() || !self.is_valid_size(width, height) {
            return None;
        }

        let layout = |width: u32, height, channels: u32| {
            width.checked_mul(channels)?;
            Some(PlaneLayout {
                width,
                height,
                channels,
            })
        };

        if self.is_generic() {
            return layout(width, height, self.generic_channels());
        }

        match self {
            PixelFormat::Y_UV12
            | PixelFormat::Y_VU12
            | PixelFormat::Y_UV12_FULL_RANGE
            | PixelFormat::Y_VU12_FULL_RANGE => match plane {
                0 => layout(width, height, 1),
                _ => layout(width / 2, height / 2, 2),
            },
            PixelFormat::Y_U_V12
            | PixelFormat::Y_V_U12
            | PixelFormat::Y_U_V12_FULL_RANGE
            | PixelFormat::Y_V_U12_FULL_RANGE => match plane {
                0 => layout(width, height, 1),
                _ => layout(width / 2, height / 2, 1),
            },
            PixelFormat::Y_U_V24 | PixelFormat::Y_U_V24_FULL_RANGE => layout(width, height, 1),
            PixelFormat::YUYV16 | PixelFormat::UYVY16 => layout(width, height, 2),
            PixelFormat::Y10_PACKED | PixelFormat::BGGR10_PACKED | PixelFormat::RGGB10_PACKED => {
                // The width is a multiple of four
                layout((width / 4).checked_mul(5)?, height, 1)
            }
            _ => {
                // Multi plane generic formats repeat the same layout on each plane
                let channels = self.generic_channels();
                if channels == 0 {
                    None
                } else {
                    layout(width, height, channels)
                }
            }
        }
    }

    /// Translates a pixel format name (e.g. `"Y_UV12"`) into a pixel format.
    ///
    /// Unknown names translate to `UNDEFINED`.
    pub fn from_name(name: &str) -> PixelFormat {
        names()
            .get(name)
            .copied()
            .unwrap_or(PixelFormat::UNDEFINED)
    }

    /// Name of a predefined pixel format, `"UNDEFINED"` otherwise
    pub fn name(self) -> &'static str {
        self.predefined_name().unwrap_or("UNDEFINED")
    }
}

fn names() -> &'static HashMap<&'static str, PixelFormat> {
    static NAMES: OnceLock<HashMap<&'static str, PixelFormat>> = OnceLock::new();
    NAMES.get_or_init(|| {
        let mut map: HashMap<_, _> = PixelFormat::PREDEFINED
            .iter()
            .map(|format| (format.name(), *format))
            .collect();

        map.insert("Y8_FULL_RANGE", PixelFormat::Y8_FULL_RANGE);
        map.insert("Y_UV12_LIMITED_RANGE", PixelFormat::Y_UV12_LIMITED_RANGE);
        map.insert("Y_VU12_LIMITED_RANGE", PixelFormat::Y_VU12_LIMITED_RANGE);
        map.insert("Y_U_V12_LIMITED_RANGE", PixelFormat::Y_U_V12_LIMITED_RANGE);
        map.insert("Y_V_U12_LIMITED_RANGE", PixelFormat::Y_V_U12_LIMITED_RANGE);
        map.insert("Y_U_V24_LIMITED_RANGE", PixelFormat::Y_U_V24_LIMITED_RANGE);
        map
    })
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.predefined_name() {
            Some(name) => write!(f, "{name}"),
            None if self.is_pure_generic() => write!(
                f,
                "GENERIC<{:?},{}>",
                self.data_type(),
                self.generic_channels()
            ),
            None => write!(f, "UNDEFINED"),
        }
    }
}

impl fmt::Debug for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self}({:#x})", self.0)
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        PixelFormat::UNDEFINED
    }
}

/// Computes the number of bytes required to store each plane of an image.
///
/// `padding_elements`, when given, holds the padding of each plane in elements.
/// Sizes that do not fit in `usize` are reported as [`ErrorKind::InvalidValue`].
pub fn get_buffers_size(
    pixel_format: PixelFormat,
    width: u32,
    height: u32,
    padding_elements: &[u32],
    buffers_size: &mut [usize],
) -> Result<(), ErrorKind> {
    let planes = pixel_format.number_planes() as usize;
    if planes == 0 || planes > MAX_NUMBER_OF_PLANES {
        return Err(ErrorKind::InvalidValue);
    }

    if buffers_size.len() < planes {
        return Err(ErrorKind::NotEnoughData);
    }

    let element_size = pixel_format.data_type().bytes();
    for (plane, size) in buffers_size.iter_mut().enumerate().take(planes) {
        let layout = pixel_format
            .plane_layout(width, height, plane as u32)
            .ok_or(ErrorKind::InvalidValue)?;
        let padding = padding_elements.get(plane).copied().unwrap_or(0) as usize;

        *size = layout
            .width_elements()
            .checked_add(padding)
            .and_then(|elements| elements.checked_mul(element_size))
            .and_then(|stride| stride.checked_mul(layout.height as usize))
            .ok_or(ErrorKind::InvalidValue)?;
    }

    Ok(())
}
