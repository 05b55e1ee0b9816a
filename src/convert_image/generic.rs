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
use crate::conversion_flag::ConversionFlag;
use crate::options::ConversionOptions;
use crate::worker::Worker;
use core::marker::PhantomData;
use core::ptr::NonNull;
use log::trace;

/// Converts `pixels` pixels of one row
pub type RowFunction<TS, TT> = fn(&[TS], &mut [TT], usize, &ConversionOptions);

/// Reverses the order of `pixels` pixels of one row, in place
pub type ReverseFunction<T> = fn(&mut [T], usize);

/// Converts one group of rows: sources and targets hold the rows of each plane,
/// plane after plane. The boolean requests right to left output.
pub type RowsFunction = fn(&[&[u8]], &mut [&mut [u8]], u32, bool, &ConversionOptions);

/// Images with at least this many rows (or row groups) fan out to the worker
pub const MINIMUM_ROWS_FOR_WORKER: u32 = 200;
pub const MINIMUM_ROWS_PER_TASK: u32 = 20;
pub const MINIMUM_ROWS_PER_IN_PLACE_TASK: u32 = 100;

const MAX_PLANES: usize = 3;
const MAX_ROWS: usize = 6;

/// Memory layout of one plane relative to the image, as seen by a rows function.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlaneShape {
    /// Plane width is `image_width * width_numerator / width_denominator` pixels
    pub width_numerator: u32,
    pub width_denominator: u32,
    /// Interleaved elements per plane pixel
    pub channels: u32,
    /// Rows of this plane consumed or produced by one invocation
    pub rows_per_iteration: u32,
    /// Bytes per element
    pub element_bytes: u32,
}

impl PlaneShape {
    /// One byte per element, full resolution
    pub const fn full(channels: u32, rows_per_iteration: u32) -> Self {
        PlaneShape {
            width_numerator: 1,
            width_denominator: 1,
            channels,
            rows_per_iteration,
            element_bytes: 1,
        }
    }

    /// One byte per element, horizontally subsampled by two
    pub const fn half(channels: u32, rows_per_iteration: u32) -> Self {
        PlaneShape {
            width_denominator: 2,
            ..PlaneShape::full(channels, rows_per_iteration)
        }
    }

    pub const fn with_width_ratio(mut self, numerator: u32, denominator: u32) -> Self {
        self.width_numerator = numerator;
        self.width_denominator = denominator;
        self
    }

    pub const fn with_element_bytes(mut self, element_bytes: u32) -> Self {
        self.element_bytes = element_bytes;
        self
    }

    fn row_bytes(&self, width: u32) -> usize {
        (width as usize) * (self.width_numerator as usize) / (self.width_denominator as usize)
            * (self.channels as usize)
            * (self.element_bytes as usize)
    }

    fn stride_bytes(&self, width: u32, padding_elements: u32) -> usize {
        self.row_bytes(width) + (padding_elements as usize) * (self.element_bytes as usize)
    }
}

/// A rows function together with the shapes of the planes it reads and writes.
///
/// A kernel with no source planes converts its target in place.
#[derive(Copy, Clone)]
pub struct RowsKernel {
    pub sources: &'static [PlaneShape],
    pub targets: &'static [PlaneShape],
    /// Image rows covered by one invocation
    pub image_rows_per_iteration: u32,
    pub function: RowsFunction,
}

/// Disjoint mutable access to the rows of a buffer from several threads.
struct SharedRows<'a, T> {
    data: NonNull<T>,
    len: usize,
    marker: PhantomData<&'a mut [T]>,
}

// Rows handed out by one instance never overlap across threads, see `row`
unsafe impl<T: Send> Send for SharedRows<'_, T> {}
unsafe impl<T: Send> Sync for SharedRows<'_, T> {}

impl<'a, T> SharedRows<'a, T> {
    fn new(buffer: &'a mut [T]) -> Self {
        SharedRows {
            len: buffer.len(),
            // A slice pointer is never null, empty slices are dangling
            data: NonNull::from(buffer).cast(),
            marker: PhantomData,
        }
    }

    fn empty() -> Self {
        SharedRows {
            data: NonNull::dangling(),
            len: 0,
            marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// No two live slices returned by this function may overlap.
    #[allow(clippy::mut_from_ref)]
    unsafe fn row(&self, offset: usize, len: usize) -> &mut [T] {
        assert!(offset <= self.len && len <= self.len - offset);
        core::slice::from_raw_parts_mut(self.data.as_ptr().add(offset), len)
    }
}

fn fan_out<F>(rows: u32, minimum_per_task: u32, worker: Option<&Worker>, function: F)
where
    F: Fn(u32, u32) + Sync,
{
    match worker {
        Some(worker) if rows >= MINIMUM_ROWS_FOR_WORKER => {
            trace!("{rows} rows on {} threads", worker.threads());
            worker.execute_function(0, rows, minimum_per_task, function);
        }
        _ => {
            trace!("{rows} rows on the calling thread");
            function(0, rows);
        }
    }
}

/// Converts a frame with one plane into a frame with one plane, row by row.
///
/// Strides are in elements and include the padding. Flipping maps source row `y` to
/// target row `height - 1 - y`; mirroring converts the row and then reverses it in
/// place. When both frames have no padding and no flag applies, the whole image is
/// converted as one long row.
pub fn convert_generic_pixel_format<TS, TT>(
    source: &[TS],
    target: &mut [TT],
    width: u32,
    height: u32,
    source_stride_elements: usize,
    target_stride_elements: usize,
    flag: ConversionFlag,
    row_function: RowFunction<TS, TT>,
    reverse_function: ReverseFunction<TT>,
    are_continuous: bool,
    options: &ConversionOptions,
    worker: Option<&Worker>,
) where
    TS: Copy + Sync,
    TT: Copy + Send,
{
    let rows = height as usize;
    debug_assert!(width != 0 && height != 0);
    debug_assert!(source.len() >= source_stride_elements * rows);
    debug_assert!(target.len() >= target_stride_elements * rows);

    let pixels = width as usize;
    if flag == ConversionFlag::Normal && are_continuous {
        row_function(source, target, pixels * rows, options);
        return;
    }

    let flipped = flag.is_flipped();
    let mirrored = flag.is_mirrored();
    let target = SharedRows::new(target);

    fan_out(height, MINIMUM_ROWS_PER_TASK, worker, |first, count| {
        for y in first as usize..(first + count) as usize {
            let source_offset = y * source_stride_elements;
            let source_row = &source[source_offset..source_offset + source_stride_elements];

            let target_y = if flipped { rows - 1 - y } else { y };
            // Rows are disjoint, each subset owns its own rows
            let target_row = unsafe {
                target.row(target_y * target_stride_elements, target_stride_elements)
            };

            row_function(source_row, target_row, pixels, options);
            if mirrored {
                reverse_function(target_row, pixels);
            }
        }
    });
}

/// Copies the rows of one plane, `row_bytes` bytes each.
///
/// Flipping maps source row `y` to target row `height - 1 - y`. Mirroring reverses
/// the order of the `pixel_bytes` wide pixels of each row, keeping the bytes of each
/// pixel in order.
pub fn copy_plane(
    source: &[u8],
    target: &mut [u8],
    row_bytes: usize,
    height: u32,
    (source_stride, target_stride): (usize, usize),
    flag: ConversionFlag,
    pixel_bytes: usize,
    worker: Option<&Worker>,
) {
    let rows = height as usize;
    debug_assert!(pixel_bytes != 0 && row_bytes % pixel_bytes == 0);
    debug_assert!(source_stride >= row_bytes && target_stride >= row_bytes);
    debug_assert!(rows == 0 || source.len() >= source_stride * (rows - 1) + row_bytes);
    debug_assert!(rows == 0 || target.len() >= target_stride * (rows - 1) + row_bytes);

    let flipped = flag.is_flipped();
    let mirrored = flag.is_mirrored();
    let target = SharedRows::new(target);

    fan_out(height, MINIMUM_ROWS_PER_TASK, worker, |first, count| {
        for y in first as usize..(first + count) as usize {
            let source_offset = y * source_stride;
            let source_row = &source[source_offset..source_offset + row_bytes];

            let target_y = if flipped { rows - 1 - y } else { y };
            // Rows are disjoint, each subset owns its own rows
            let target_row = unsafe { target.row(target_y * target_stride, row_bytes) };

            target_row.copy_from_slice(source_row);
            if mirrored {
                target_row.reverse();
                for pixel in target_row.chunks_exact_mut(pixel_bytes) {
                    pixel.reverse();
                }
            }
        }
    });
}

/// Converts a frame into another one, each with any number of planes, one group of
/// rows at a time.
///
/// Strides are computed from the plane shapes of the kernel and the padding of
/// `options` (sources first, then targets). With a flip, iteration `i` writes the
/// target row group `n - 1 - i`, with the rows of the group in reverse order.
/// Mirroring is left to the rows function.
pub fn convert_arbitrary_pixel_format(
    sources: &[&[u8]],
    targets: &mut [&mut [u8]],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    kernel: &RowsKernel,
    options: &ConversionOptions,
    worker: Option<&Worker>,
) {
    debug_assert!(sources.len() == kernel.sources.len());
    debug_assert!(targets.len() == kernel.targets.len());
    debug_assert!(kernel.sources.len() <= MAX_PLANES && kernel.targets.len() <= MAX_PLANES);
    debug_assert!(height % kernel.image_rows_per_iteration == 0);

    let iterations = height / kernel.image_rows_per_iteration;
    let source_planes = kernel.sources.len();

    let mut source_strides = [0usize; MAX_PLANES];
    for (plane, shape) in kernel.sources.iter().enumerate() {
        source_strides[plane] = shape.stride_bytes(width, options.padding(plane));
        debug_assert!(
            sources[plane].len()
                >= source_strides[plane] * (iterations * shape.rows_per_iteration) as usize
        );
    }

    let mut target_strides = [0usize; MAX_PLANES];
    let mut shared: [SharedRows<u8>; MAX_PLANES] = [
        SharedRows::empty(),
        SharedRows::empty(),
        SharedRows::empty(),
    ];
    for (plane, (shape, buffer)) in kernel.targets.iter().zip(targets.iter_mut()).enumerate() {
        target_strides[plane] = shape.stride_bytes(width, options.padding(source_planes + plane));
        debug_assert!(
            buffer.len() >= target_strides[plane] * (iterations * shape.rows_per_iteration) as usize
        );
        shared[plane] = SharedRows::new(buffer);
    }

    let flipped = flag.is_flipped();
    let mirrored = flag.is_mirrored();
    let minimum_per_task = if source_planes == 0 {
        MINIMUM_ROWS_PER_IN_PLACE_TASK
    } else {
        MINIMUM_ROWS_PER_TASK
    };

    fan_out(iterations, minimum_per_task, worker, |first, count| {
        for iteration in first..first + count {
            let mut source_rows: [&[u8]; MAX_ROWS] = [&[]; MAX_ROWS];
            let mut source_count = 0;
            for (plane, shape) in kernel.sources.iter().enumerate() {
                let row_bytes = shape.row_bytes(width);
                for row in 0..shape.rows_per_iteration {
                    let offset =
                        ((iteration * shape.rows_per_iteration + row) as usize) * source_strides[plane];
                    source_rows[source_count] = &sources[plane][offset..offset + row_bytes];
                    source_count += 1;
                }
            }

            let target_iteration = if flipped {
                iterations - 1 - iteration
            } else {
                iteration
            };

            let mut target_rows: [&mut [u8]; MAX_ROWS] = Default::default();
            let mut target_count = 0;
            for (plane, shape) in kernel.targets.iter().enumerate() {
                let row_bytes = shape.row_bytes(width);
                for row in 0..shape.rows_per_iteration {
                    let row = if flipped {
                        shape.rows_per_iteration - 1 - row
                    } else {
                        row
                    };

                    let offset = ((target_iteration * shape.rows_per_iteration + row) as usize)
                        * target_strides[plane];
                    // Each iteration owns its own target rows
                    target_rows[target_count] = unsafe { shared[plane].row(offset, row_bytes) };
                    target_count += 1;
                }
            }

            (kernel.function)(
                &source_rows[..source_count],
                &mut target_rows[..target_count],
                width,
                mirrored,
                options,
            );
        }
    });
}
