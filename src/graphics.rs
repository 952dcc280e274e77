//! Graphics support via embedded-graphics
//!
//! This module implements the
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait
//! from the embedded-graphics ecosystem directly on [`Max7219`], treating
//! the whole chain as one monochrome strip of `devices * 8` by 8 pixels.
//! Pixels land in the driver's framebuffer and flush on completion of each
//! draw call, honoring buffered mode like every other write.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! # use core::convert::Infallible;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! use stressled::Max7219;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! let mut matrix: Max7219<_, 4> = Max7219::new(MockSpi);
//!
//! let _ = Rectangle::new(Point::new(2, 1), Size::new(12, 6))
//!     .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
//!     .draw(&mut matrix);
//! ```

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};
use embedded_hal::spi::SpiDevice;

use crate::interface::Max7219;

impl<SPI, const DEVICES: usize> DrawTarget for Max7219<SPI, DEVICES>
where
    SPI: SpiDevice,
{
    type Color = BinaryColor;
    type Error = SPI::Error;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let sz = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let x = x as u32;
            let y = y as u32;

            if x >= sz.width || y >= sz.height {
                continue;
            }

            self.set_pixel(x as usize, y as usize, color.is_on());
        }

        self.commit()
    }
}

impl<SPI, const DEVICES: usize> OriginDimensions for Max7219<SPI, DEVICES>
where
    SPI: SpiDevice,
{
    fn size(&self) -> Size {
        Size::new(DEVICES as u32 * 8, 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use embedded_graphics::{
        pixelcolor::BinaryColor,
        prelude::*,
        primitives::{Line, PrimitiveStyle, Rectangle},
    };
    use embedded_hal::spi::{ErrorType, Operation, SpiDevice};

    #[derive(Debug, Default)]
    struct MockSpi;

    impl ErrorType for MockSpi {
        type Error = core::convert::Infallible;
    }

    impl SpiDevice for MockSpi {
        fn transaction(
            &mut self,
            _operations: &mut [Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn chain() -> Max7219<MockSpi, 4> {
        Max7219::new(MockSpi)
    }

    #[test]
    fn test_size_spans_the_chain() {
        let matrix = chain();
        assert_eq!(matrix.size(), Size::new(32, 8));
    }

    #[test]
    fn test_single_pixel_lands_in_framebuffer() {
        let mut matrix = chain();
        Pixel(Point::new(9, 3), BinaryColor::On)
            .draw(&mut matrix)
            .unwrap();
        // Column 9 is bit 6 of device 1
        assert_eq!(matrix.framebuffer()[1][3], 0x40);
    }

    #[test]
    fn test_off_pixel_clears() {
        let mut matrix = chain();
        Pixel(Point::new(0, 0), BinaryColor::On)
            .draw(&mut matrix)
            .unwrap();
        assert_eq!(matrix.framebuffer()[0][0], 0x80);

        Pixel(Point::new(0, 0), BinaryColor::Off)
            .draw(&mut matrix)
            .unwrap();
        assert_eq!(matrix.framebuffer()[0][0], 0x00);
    }

    #[test]
    fn test_out_of_bounds_pixels_are_ignored() {
        let mut matrix = chain();
        for point in [
            Point::new(-1, 0),
            Point::new(0, -1),
            Point::new(32, 0),
            Point::new(0, 8),
        ] {
            Pixel(point, BinaryColor::On).draw(&mut matrix).unwrap();
        }
        assert_eq!(matrix.framebuffer(), &[[0; 8]; 4]);
    }

    #[test]
    fn test_horizontal_line_crosses_device_boundary() {
        let mut matrix = chain();
        Line::new(Point::new(6, 2), Point::new(9, 2))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut matrix)
            .unwrap();
        assert_eq!(matrix.framebuffer()[0][2], 0x03);
        assert_eq!(matrix.framebuffer()[1][2], 0xC0);
    }

    #[test]
    fn test_filled_rectangle_coexists_with_canvas_writes() {
        let mut matrix = chain();
        Rectangle::new(Point::new(0, 0), Size::new(8, 8))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut matrix)
            .unwrap();
        assert_eq!(matrix.framebuffer()[0], [0xFF; 8]);

        matrix.shift_left().unwrap();
        assert_eq!(matrix.framebuffer()[0], [0x7F; 8]);
    }
}
