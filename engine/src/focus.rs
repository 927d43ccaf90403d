//! Keypad focus and arrow-key navigation.
//!
//! The keypad grid is generated from the static key tables; navigation
//! works on row/column geometry derived from each key's span so the
//! highlighted key moves the way the rendered grid looks.

use nebula_types::{KeyConfig, SCIENTIFIC_KEYS, STANDARD_KEYS};

/// Number of columns in the standard keypad grid.
pub const STANDARD_COLUMNS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDir {
    Up,
    Down,
    Left,
    Right,
}

/// Which key the keypad cursor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadFocus {
    /// Index into [`SCIENTIFIC_KEYS`].
    Scientific(usize),
    /// Index into [`STANDARD_KEYS`].
    Standard(usize),
}

impl Default for KeypadFocus {
    fn default() -> Self {
        // The "7" key: first numeric key of the grid.
        KeypadFocus::Standard(4)
    }
}

impl KeypadFocus {
    /// Resolve the focused key's configuration.
    #[must_use]
    pub fn key(self) -> KeyConfig {
        match self {
            KeypadFocus::Scientific(i) => SCIENTIFIC_KEYS[i.min(SCIENTIFIC_KEYS.len() - 1)],
            KeypadFocus::Standard(i) => STANDARD_KEYS[i.min(STANDARD_KEYS.len() - 1)],
        }
    }

    /// Move the focus one step. `scientific_visible` gates whether Up from
    /// the top row enters the scientific row.
    #[must_use]
    pub fn moved(self, dir: NavDir, scientific_visible: bool) -> Self {
        match self {
            KeypadFocus::Scientific(i) => move_scientific(i, dir),
            KeypadFocus::Standard(i) => move_standard(i, dir, scientific_visible),
        }
    }

    /// Clamp focus back into the standard grid when the scientific row is
    /// hidden while focused.
    #[must_use]
    pub fn without_scientific(self) -> Self {
        match self {
            KeypadFocus::Scientific(_) => KeypadFocus::default(),
            standard => standard,
        }
    }
}

fn move_scientific(index: usize, dir: NavDir) -> KeypadFocus {
    match dir {
        NavDir::Left => KeypadFocus::Scientific(index.saturating_sub(1)),
        NavDir::Right => KeypadFocus::Scientific((index + 1).min(SCIENTIFIC_KEYS.len() - 1)),
        NavDir::Up => KeypadFocus::Scientific(index),
        // Land on the standard top row, roughly under the cursor.
        NavDir::Down => {
            let col = scale_column(index, SCIENTIFIC_KEYS.len(), STANDARD_COLUMNS as usize);
            KeypadFocus::Standard(standard_index_at(0, col as u8))
        }
    }
}

fn move_standard(index: usize, dir: NavDir, scientific_visible: bool) -> KeypadFocus {
    let (row, col) = standard_position(index);
    match dir {
        NavDir::Left => KeypadFocus::Standard(index.saturating_sub(1)),
        NavDir::Right => KeypadFocus::Standard((index + 1).min(STANDARD_KEYS.len() - 1)),
        NavDir::Up => {
            if row == 0 {
                if scientific_visible {
                    let sci =
                        scale_column(col as usize, STANDARD_COLUMNS as usize, SCIENTIFIC_KEYS.len());
                    KeypadFocus::Scientific(sci)
                } else {
                    KeypadFocus::Standard(index)
                }
            } else {
                KeypadFocus::Standard(standard_index_at(row - 1, col))
            }
        }
        NavDir::Down => {
            if row == standard_row_count() - 1 {
                KeypadFocus::Standard(index)
            } else {
                KeypadFocus::Standard(standard_index_at(row + 1, col))
            }
        }
    }
}

/// Row/column of a standard key, accounting for spans.
fn standard_position(index: usize) -> (usize, u8) {
    let mut row = 0usize;
    let mut col = 0u8;
    for (i, key) in STANDARD_KEYS.iter().enumerate() {
        if i == index {
            return (row, col);
        }
        col += key.span;
        if col >= STANDARD_COLUMNS {
            col = 0;
            row += 1;
        }
    }
    (row, col)
}

/// Index of the key covering `col` in `row` (clamped to the row's last key).
fn standard_index_at(target_row: usize, target_col: u8) -> usize {
    let mut row = 0usize;
    let mut col = 0u8;
    let mut last_in_row = 0usize;
    for (i, key) in STANDARD_KEYS.iter().enumerate() {
        if row == target_row {
            last_in_row = i;
            if target_col >= col && target_col < col + key.span {
                return i;
            }
        }
        if row > target_row {
            break;
        }
        col += key.span;
        if col >= STANDARD_COLUMNS {
            col = 0;
            row += 1;
        }
    }
    last_in_row
}

fn standard_row_count() -> usize {
    let total: u32 = STANDARD_KEYS.iter().map(|k| u32::from(k.span)).sum();
    (total as usize).div_ceil(STANDARD_COLUMNS as usize)
}

/// Map a column from one row width to another, preserving relative position.
fn scale_column(index: usize, from: usize, to: usize) -> usize {
    if from <= 1 {
        return 0;
    }
    (index * (to - 1)).div_euclid(from - 1)
}
