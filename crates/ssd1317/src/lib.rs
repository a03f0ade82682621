#![cfg_attr(not(test), no_std)]

//! SSD1317 (96x96 monochrome OLED) driver primitives and rasterizer.
//!
//! The crate splits into three layers: [`protocol`] encodes the command
//! stream, [`FrameBuffer`] holds the page-packed pixel state, and
//! [`Painter`] rasterizes shapes, text and images into any [`DrawSurface`].
//! The [`Ssd1317`] driver owns the bus and streams buffer pages out.

mod font;
mod framebuffer;
mod painter;
pub mod protocol;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use font::Font;
pub use framebuffer::{DrawSurface, FrameBuffer};
pub use painter::{DrawMode, Painter};

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

/// Driver configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Expected SPI clock in Hz (documented for board glue).
    pub spi_hz: u32,
    /// Contrast level applied after the init sequence.
    pub contrast: u8,
    /// RES low pulse width in nanoseconds.
    pub reset_pulse_ns: u32,
    /// Post-reset settle time in nanoseconds.
    pub reset_settle_ns: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spi_hz: 8_000_000,
            contrast: 0x40,
            reset_pulse_ns: 10_000,
            reset_settle_ns: 200_000,
        }
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<SpiErr, DcErr, RstErr> {
    /// SPI transaction failed.
    Spi(SpiErr),
    /// D/C pin operation failed.
    Dc(DcErr),
    /// RES pin operation failed.
    Rst(RstErr),
    /// Input parameters are outside supported bounds.
    InvalidInput,
}

pub type DriverResult<SpiErr, DcErr, RstErr> = Result<(), Error<SpiErr, DcErr, RstErr>>;

/// SSD1317 driver.
#[derive(Debug)]
pub struct Ssd1317<SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: RST,
    config: Config,
}

impl<SPI, DC, RST> Ssd1317<SPI, DC, RST>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Creates a new driver instance.
    pub fn new(spi: SPI, dc: DC, rst: RST, config: Config) -> Self {
        Self {
            spi,
            dc,
            rst,
            config,
        }
    }

    /// Returns current configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Releases owned bus and pins.
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }

    /// Pulses RES low and waits for the panel to settle.
    pub fn reset(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.rst.set_low().map_err(Error::Rst)?;
        delay.delay_ns(self.config.reset_pulse_ns);
        self.rst.set_high().map_err(Error::Rst)?;
        delay.delay_ns(self.config.reset_settle_ns);
        Ok(())
    }

    /// Resets the panel, programs the init sequence, zeroes GDDRAM and turns
    /// the display on.
    pub fn init(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.reset(delay)?;
        self.write_commands(protocol::INIT_SEQUENCE)?;
        self.write_commands(&protocol::encode_contrast(self.config.contrast))?;

        // GDDRAM content is undefined after power-up.
        let blank = [0u8; protocol::WIDTH];
        for page in 0..protocol::PAGES {
            self.set_cursor(page, 0)?;
            self.write_data(&blank)?;
        }

        self.write_command(protocol::CMD_DISPLAY_ON)
    }

    /// Sends one command byte.
    pub fn write_command(&mut self, command: u8) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.write_commands(&[command])
    }

    /// Sends a run of command bytes.
    pub fn write_commands(
        &mut self,
        commands: &[u8],
    ) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.dc.set_low().map_err(Error::Dc)?;
        self.spi.write(commands).map_err(Error::Spi)
    }

    /// Sends a run of GDDRAM data bytes.
    pub fn write_data(&mut self, data: &[u8]) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.dc.set_high().map_err(Error::Dc)?;
        self.spi.write(data).map_err(Error::Spi)
    }

    /// Positions the GDDRAM write cursor.
    pub fn set_cursor(
        &mut self,
        page: usize,
        column: usize,
    ) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        let packet = protocol::encode_set_cursor(page, column).ok_or(Error::InvalidInput)?;
        self.write_commands(&packet)
    }

    /// Turns the panel output on.
    pub fn display_on(&mut self) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.write_command(protocol::CMD_DISPLAY_ON)
    }

    /// Turns the panel output off; GDDRAM is retained.
    pub fn display_off(&mut self) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.write_command(protocol::CMD_DISPLAY_OFF)
    }

    /// Inverts the panel output without touching GDDRAM.
    pub fn invert_video(
        &mut self,
        inverted: bool,
    ) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.write_command(if inverted {
            protocol::CMD_INVERSE_VIDEO
        } else {
            protocol::CMD_NORMAL_VIDEO
        })
    }

    /// Reprograms the contrast level.
    pub fn set_contrast(&mut self, level: u8) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.write_commands(&protocol::encode_contrast(level))
    }

    /// Streams the whole framebuffer.
    pub fn flush_full(
        &mut self,
        buffer: &FrameBuffer,
    ) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        for page in 0..protocol::PAGES {
            let row = buffer.page(page).ok_or(Error::InvalidInput)?;
            self.set_cursor(page, 0)?;
            self.write_data(row)?;
        }
        Ok(())
    }

    /// Streams only the pages covering a pixel-space region.
    ///
    /// The region is clamped to the panel; the page span rounds the region
    /// out to whole pages.
    pub fn flush_region(
        &mut self,
        buffer: &FrameBuffer,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    ) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }

        let (first, last) = protocol::page_span(y, height as i32);
        let first = first.max(0);
        let last = last.min(protocol::PAGES as i32);

        let col = x.max(0);
        if col >= protocol::WIDTH as i32 {
            return Ok(());
        }
        let len = (x + width as i32).min(protocol::WIDTH as i32) - col;
        if len <= 0 {
            return Ok(());
        }

        for page in first..last {
            let segment = buffer
                .page_segment(page as usize, col as usize, len as usize)
                .ok_or(Error::InvalidInput)?;
            self.set_cursor(page as usize, col as usize)?;
            self.write_data(segment)?;
        }
        Ok(())
    }
}
