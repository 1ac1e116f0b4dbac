//! End-to-end: DFAO text in, image file and value statistics out.

use std::fs;

use autoseq_automaton::{Basis, Dfao};
use autoseq_render::encode::PNG_SIGNATURE;
use autoseq_render::{rasterize, write_image, DfaoField, Palette, VectorField};

/// Outputs 1 when k <= n, else 0.
const LEQ: &str = "msd_tri msd_tri

0 1
0 0 -> 0
0 1 -> 1
1 0 -> 2
1 1 -> 0

1 1
0 0 -> 1
0 1 -> 1
1 0 -> 1
1 1 -> 1

2 0
0 0 -> 2
0 1 -> 2
1 0 -> 2
1 1 -> 2
";

const ONE: &str = "msd_tri msd_tri\n0 1\n0 0 -> 0\n0 1 -> 0\n1 0 -> 0\n1 1 -> 0\n";

#[test]
fn triangle_picture() {
    let dfao = Dfao::parse(LEQ).unwrap();
    let field = DfaoField::new(Basis::tribonacci(), &dfao);
    let rendering = rasterize(&field, 16).unwrap();

    let palette = Palette::default();
    // top-left: k = 15, n = 0, so k > n
    assert_eq!(rendering.raster.get(0, 0), Some(palette.color_for(0)));
    // bottom-right: k = 0, n = 15
    assert_eq!(rendering.raster.get(15, 15), Some(palette.color_for(1)));
    assert_eq!(rendering.stats.values().iter().copied().collect::<Vec<_>>(), vec![0, 1]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leq.png");
    write_image(&path, &rendering.raster).unwrap();
    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], &PNG_SIGNATURE);
}

#[test]
fn vector_picture_reports_stats() {
    let leq = Dfao::parse(LEQ).unwrap();
    let one = Dfao::parse(ONE).unwrap();
    let field = VectorField::new(Basis::tribonacci(), &leq, &one, 2, 3);
    let rendering = rasterize(&field, 8).unwrap();

    // dy leg always adds 3; dx leg adds [k <= n] + [k <= n + 1].
    assert_eq!(rendering.stats.min(), Some(3));
    assert_eq!(rendering.stats.max(), Some(5));
    assert_eq!(
        rendering.stats.to_string(),
        "min value : 3\nmax value : 5\nvalues : [3, 4, 5]"
    );

    let json = serde_json::to_value(&rendering.stats).unwrap();
    assert_eq!(json["values"], serde_json::json!([3, 4, 5]));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vector.ppm");
    write_image(&path, &rendering.raster).unwrap();
    assert_eq!(fs::read(&path).unwrap().len(), "P6\n8 8\n255\n".len() + 8 * 8 * 3);
}
