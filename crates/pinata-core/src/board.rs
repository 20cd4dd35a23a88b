//! Text board diagram.

use shakmaty::{Board, Color, File, Rank, Square};

/// Board as an 8x8 grid with coordinates, from `perspective`'s side.
/// Uppercase letters are white pieces, `.` an empty square.
pub fn diagram(board: &Board, perspective: Color) -> String {
    let (ranks, files): (Vec<u32>, Vec<u32>) = match perspective {
        Color::White => ((0..8).rev().collect(), (0..8).collect()),
        Color::Black => ((0..8).collect(), (0..8).rev().collect()),
    };

    let legend: Vec<String> = files
        .iter()
        .map(|&f| char::from(b'a' + f as u8).to_string())
        .collect();
    let legend = format!("  {}\n", legend.join(" "));

    let mut out = legend.clone();
    for &r in &ranks {
        let rank_label = char::from(b'1' + r as u8);
        let row: Vec<String> = files
            .iter()
            .map(|&f| {
                let square = Square::from_coords(File::new(f), Rank::new(r));
                board
                    .piece_at(square)
                    .map(|piece| piece.char())
                    .unwrap_or('.')
                    .to_string()
            })
            .collect();
        out.push_str(&format!("{rank_label} {} {rank_label}\n", row.join(" ")));
    }
    out.push_str(&legend);
    out
}
