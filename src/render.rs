//! Plain-text board drawing. Each hex renders as a fixed 7x13 character
//! block; rows overlap their neighbors by one column so shared edges are
//! drawn once.

use crate::board::{Board, Hex};

const BLOCK_WIDTH: usize = 13;
const INNER_WIDTH: usize = 11;

/// Hex labels by visual row, top to bottom.
const ROWS: [&[u8]; 5] = [
    &[1, 2, 3],
    &[4, 5, 6, 7],
    &[8, 9, 10, 11, 12],
    &[13, 14, 15, 16],
    &[17, 18, 19],
];
/// Leading spaces before each row.
const INDENTS: [usize; 5] = [12, 6, 0, 6, 12];
/// Which block lines each row contributes. Only the first row draws the top
/// rim and only the last row draws below the bottom rim.
const LINE_RANGES: [(usize, usize); 5] = [(0, 5), (1, 5), (1, 5), (1, 5), (1, 7)];

/// The seven text lines of a single hex.
pub fn hex_block(hex: &Hex) -> [String; 7] {
    let terrain = hex.terrain.to_string().to_lowercase();
    let number = if hex.number == 0 {
        String::new()
    } else {
        hex.number.to_string()
    };
    [
        "  _________  ".to_string(),
        " /         \\ ".to_string(),
        format!("/{terrain:^INNER_WIDTH$}\\"),
        format!("\\{number:^INNER_WIDTH$}/"),
        " \\         / ".to_string(),
        "  \\_______/  ".to_string(),
        " ".repeat(BLOCK_WIDTH),
    ]
}

/// Draws the whole board as 23 lines of ASCII art.
pub fn board_string(board: &Board) -> String {
    let mut out = String::new();
    for (row_index, labels) in ROWS.iter().enumerate() {
        let blocks: Vec<[String; 7]> = labels
            .iter()
            .map(|label| hex_block(board.hex(*label).expect("row labels are in range")))
            .collect();
        let (start, end) = LINE_RANGES[row_index];
        for line in start..end {
            out.push_str(&" ".repeat(INDENTS[row_index]));
            for (column, block) in blocks.iter().enumerate() {
                // Adjacent hexes share a wall column; drop the last column
                // of every block except the row's final one.
                if column + 1 < blocks.len() {
                    out.push_str(&block[line][..BLOCK_WIDTH - 1]);
                } else {
                    out.push_str(&block[line]);
                }
            }
            out.push('\n');
        }
    }
    out
}
