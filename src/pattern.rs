//! Sprite bitmaps for the heartbeat and invader animations
//!
//! Two encodings are used, matching how the renderers draw:
//!
//! - Column-encoded sprites are half-width and mirrored at draw time, so a
//!   4-column half-heart becomes an 8-column heart and a 5-column invader
//!   half becomes a 10-column sprite. Bit 0 of a column byte is the top row.
//! - Row-encoded sprites cover a full 8x8 tile, one byte per row, top row
//!   first.

/// Relaxed heartbeat, outline half-heart (column-encoded, mirrored)
pub const HEART_EMPTY: [u8; 4] = [0x1C, 0x22, 0x42, 0x84];

/// Relaxed heartbeat, filled half-heart (column-encoded, mirrored)
pub const HEART_FULL: [u8; 4] = [0x1C, 0x3E, 0x7E, 0xFC];

/// Mild-stress heartbeat, solid full-tile heart (row-encoded)
pub const HEART_SOLID: [u8; 8] = [
    0b0000_0000,
    0b0110_0110,
    0b1111_1111,
    0b1111_1111,
    0b1111_1111,
    0b0111_1110,
    0b0011_1100,
    0b0001_1000,
];

/// Mild-stress heartbeat, hollow full-tile heart (row-encoded)
pub const HEART_HOLLOW: [u8; 8] = [
    0b0000_0000,
    0b0110_0110,
    0b1001_1001,
    0b1000_0001,
    0b1000_0001,
    0b0100_0010,
    0b0010_0100,
    0b0001_1000,
];

/// Invader walk frame A, sprite half (column-encoded, mirrored)
///
/// Drawn first after a phase reset; alternates with [`INVADER_B`] on every
/// walk step.
pub const INVADER_A: [u8; 5] = [0x70, 0x18, 0x7D, 0xB6, 0x3C];

/// Invader walk frame B, sprite half (column-encoded, mirrored)
pub const INVADER_B: [u8; 5] = [0x0E, 0x98, 0x7D, 0x36, 0x3C];

/// Width of the mirrored invader sprite in columns
pub const INVADER_WIDTH: i16 = 2 * INVADER_A.len() as i16;

/// Walk start position, half the sprite width off-screen
pub const INVADER_START: i16 = -(INVADER_WIDTH / 2);
