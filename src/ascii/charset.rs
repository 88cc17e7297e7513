//! The character ramp used for every rendering.

/// Number of luminance levels, and therefore ramp entries.
pub const RAMP_LEVELS: usize = 16;

/// 16-level density ramp.
/// Characters ordered from emptiest (space) to densest (#), one per
/// 4-bit luminance level.
pub const RAMP: [char; RAMP_LEVELS] = [
    ' ', '.', ',', '-', '~', ';', '+', '=', 'x', '!', '1', '%', '$', 'O', '@', '#',
];
