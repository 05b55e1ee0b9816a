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
use crate::pixel_format::{PixelFormat, PlaneLayout, MAX_NUMBER_OF_PLANES};
use crate::ErrorKind;

/// Position of the first row of a frame in memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub enum PixelOrigin {
    /// The first row in memory is the top row of the image
    #[default]
    UpperLeft,
    /// The first row in memory is the bottom row of the image
    LowerLeft,
}

/// Shape of a frame: dimensions, pixel format and pixel origin.
///
/// A frame type is always valid: its dimensions satisfy the width and height
/// multiples of its pixel format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameType {
    width: u32,
    height: u32,
    pixel_format: PixelFormat,
    pixel_origin: PixelOrigin,
}

impl FrameType {
    /// Creates a frame type
    ///
    /// # Errors
    ///
    /// * [`InvalidValue`] if the pixel format is undefined, or if `width` or `height`
    ///   is zero or not a multiple of what the pixel format requires
    ///
    /// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
    pub fn new(
        width: u32,
        height: u32,
        pixel_format: PixelFormat,
        pixel_origin: PixelOrigin,
    ) -> Result<FrameType, ErrorKind> {
        if pixel_format == PixelFormat::UNDEFINED || !pixel_format.is_valid_size(width, height) {
            return Err(ErrorKind::InvalidValue);
        }

        Ok(FrameType {
            width,
            height,
            pixel_format,
            pixel_origin,
        })
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Pixel format
    pub const fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// Pixel origin
    pub const fn pixel_origin(&self) -> PixelOrigin {
        self.pixel_origin
    }

    /// Number of planes
    pub const fn number_planes(&self) -> u32 {
        self.pixel_format.number_planes()
    }

    /// Layout of one plane, `None` if the plane does not exist
    pub fn plane_layout(&self, plane: u32) -> Option<PlaneLayout> {
        self.pixel_format
            .plane_layout(self.width, self.height, plane)
    }

    /// Distance in bytes between two rows of a plane, `None` if it overflows `usize`
    pub fn stride_bytes(&self, plane: u32, padding_elements: u32) -> Option<usize> {
        let layout = self.plane_layout(plane)?;
        layout
            .width_elements()
            .checked_add(padding_elements as usize)?
            .checked_mul(self.pixel_format.data_type().bytes())
    }

    /// Minimum number of bytes of a plane, `None` if it overflows `usize`
    pub fn plane_bytes(&self, plane: u32, padding_elements: u32) -> Option<usize> {
        let layout = self.plane_layout(plane)?;
        let stride = self.stride_bytes(plane, padding_elements)?;
        stride.checked_mul(layout.height as usize)
    }
}

fn check_planes(
    frame_type: &FrameType,
    lengths: impl ExactSizeIterator<Item = usize>,
    padding_elements: Option<&[u32]>,
) -> Result<[u32; MAX_NUMBER_OF_PLANES], ErrorKind> {
    let number_planes = frame_type.number_planes() as usize;
    if lengths.len() != number_planes {
        return Err(ErrorKind::InvalidValue);
    }

    let mut padding = [0; MAX_NUMBER_OF_PLANES];
    if let Some(padding_elements) = padding_elements {
        if padding_elements.len() < number_planes {
            return Err(ErrorKind::NotEnoughData);
        }

        padding[..number_planes].copy_from_slice(&padding_elements[..number_planes]);
    }

    for (plane, length) in lengths.enumerate() {
        let required = frame_type
            .plane_bytes(plane as u32, padding[plane])
            .ok_or(ErrorKind::InvalidValue)?;
        if length < required {
            return Err(ErrorKind::NotEnoughData);
        }
    }

    Ok(padding)
}

/// A read only view over the planes of an image.
#[derive(Debug)]
pub struct Frame<'a> {
    frame_type: FrameType,
    planes: Vec<&'a [u8]>,
    padding_elements: [u32; MAX_NUMBER_OF_PLANES],
}

impl<'a> Frame<'a> {
    /// Creates a frame over borrowed planes
    ///
    /// `padding_elements`, when given, holds the padding at the end of each row of
    /// each plane, in elements of the pixel format data type.
    ///
    /// # Errors
    ///
    /// * [`InvalidValue`] if the number of planes differs from the one of the pixel format
    ///
    /// * [`NotEnoughData`] if a plane is shorter than its stride times its height, or
    ///   if `padding_elements` has fewer values than planes
    ///
    /// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
    /// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
    pub fn new(
        frame_type: FrameType,
        planes: &[&'a [u8]],
        padding_elements: Option<&[u32]>,
    ) -> Result<Frame<'a>, ErrorKind> {
        let padding_elements =
            check_planes(&frame_type, planes.iter().map(|x| x.len()), padding_elements)?;

        Ok(Frame {
            frame_type,
            planes: planes.to_vec(),
            padding_elements,
        })
    }

    /// Shape of the frame
    pub const fn frame_type(&self) -> &FrameType {
        &self.frame_type
    }

    /// All the planes, in pixel format order
    pub fn planes(&self) -> &[&'a [u8]] {
        &self.planes
    }

    /// Padding of a plane, in elements
    pub fn padding_elements(&self, plane: usize) -> u32 {
        self.padding_elements.get(plane).copied().unwrap_or(0)
    }
}

/// A writable view over the planes of an image.
#[derive(Debug)]
pub struct FrameMut<'a> {
    frame_type: FrameType,
    planes: Vec<&'a mut [u8]>,
    padding_elements: [u32; MAX_NUMBER_OF_PLANES],
}

impl<'a> FrameMut<'a> {
    /// Creates a writable frame over borrowed planes
    ///
    /// # Errors
    ///
    /// Same as [`Frame::new`]
    pub fn new(
        frame_type: FrameType,
        planes: Vec<&'a mut [u8]>,
        padding_elements: Option<&[u32]>,
    ) -> Result<FrameMut<'a>, ErrorKind> {
        let padding_elements =
            check_planes(&frame_type, planes.iter().map(|x| x.len()), padding_elements)?;

        Ok(FrameMut {
            frame_type,
            planes,
            padding_elements,
        })
    }

    /// Shape of the frame
    pub const fn frame_type(&self) -> &FrameType {
        &self.frame_type
    }

    /// All the planes, in pixel format order
    pub fn planes(&self) -> &[&'a mut [u8]] {
        &self.planes
    }

    /// All the planes, writable
    pub fn planes_mut(&mut self) -> &mut [&'a mut [u8]] {
        &mut self.planes
    }

    /// Padding of a plane, in elements
    pub fn padding_elements(&self, plane: usize) -> u32 {
        self.padding_elements.get(plane).copied().unwrap_or(0)
    }

    /// Read only view of the same planes
    pub fn as_frame(&self) -> Frame<'_> {
        Frame {
            frame_type: self.frame_type,
            planes: self.planes.iter().map(|x| &**x).collect(),
            padding_elements: self.padding_elements,
        }
    }
}
