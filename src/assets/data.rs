//! Generated asset bundle.
//!
//! Produced from the contents of the `static/` directory; each payload is
//! the base64 encoding of the gzip-compressed file. Regenerate rather than
//! editing by hand.

use super::table::Asset;

/// Entries of the builtin bundle.
pub fn entries() -> Vec<(String, Asset)> {
    vec![
        (
            "/static/test.css".to_string(),
            Asset::file(
                "static/test.css",
                59,
                1_464_367_588,
                "\
H4sIAAAJbogA/0rKT6lUqOblUgCCpMTk7PSi/NK8FN3k/Jz8IiuFlMSi7KLUFGuIPFQwuTIxDyhSCwgA
AP//R+/zwjsAAAA=",
            ),
        ),
        (
            "/static/test.html".to_string(),
            Asset::file(
                "static/test.html",
                817,
                1_464_367_325,
                "\
H4sIAAAJbogA/3yTvW7jMAzH9wPuHQgNt+WE5MZTPHfo0CEvwNhspJS2BVEJkrcv/ZFW+aphQKL449/U
X7LzueXq9y/Qx3nCZp6PcQ6ZqdqQZHjDHTk7LRQEh+4DfKL3tcmK/a1FDCTitZF8ZhJPlA3kc6QBOGU7
AraUkDqFmEFSPWvs5apij0ecGFM5O80uDduiY7ftm3Mp7JcQmklzEbV9U+7EL6/Q1Yh6Yu5N9TIMiqxK
JFYbHwT03R9UBSF/i8UrMBHUjCJrQ03IfVrUPfdJgLHbLYYtmQIfS5pwvJSooXSbn2yK2F2gQQQiY+ge
oXd4SxkhYsJdwujhUQt3tWpCoj/dVuL/INMofTuv0AnbyHMwyOm5DDVPenmWfJhwVt0o/bRqaBkf+LaC
Q/Ua9DCWzur0SXL1U/LfTdLZr684O98rvRDDr/IZAAD//3bVt40xAwAA",
            ),
        ),
        (
            "/static/test.js".to_string(),
            Asset::file(
                "static/test.js",
                16,
                1_464_366_989,
                "H4sIAAAJbogA/0rMSS0q0VDKSM3JyVdU0rQGBAAA//9uPMx/EAAAAA==",
            ),
        ),
        ("/".to_string(), Asset::dir("/")),
        ("/static".to_string(), Asset::dir("/static")),
    ]
}

#[cfg(test)]
mod tests {
    use crate::assets::AssetTable;

    #[test]
    fn test_builtin_bundle_shape() {
        let table = AssetTable::builtin();
        assert_eq!(table.len(), 5);
        assert!(table.get("/static/test.css").is_some());
        assert!(table.get("/static/test.html").is_some());
        assert!(table.get("/static/test.js").is_some());
        assert!(table.get("/").unwrap().is_dir);
        assert!(table.get("/static").unwrap().is_dir);
    }

    #[test]
    fn test_builtin_payloads_inflate() {
        let table = AssetTable::builtin();
        for path in ["/static/test.css", "/static/test.html", "/static/test.js"] {
            let asset = table.get(path).unwrap();
            let data = asset.contents().unwrap();
            assert_eq!(data.len() as u64, asset.size, "size mismatch for {path}");
        }
    }

    #[test]
    fn test_known_file_content() {
        let table = AssetTable::builtin();
        let js = table.get("/static/test.js").unwrap();
        assert_eq!(js.modified, 1_464_366_989);
        assert_eq!(js.contents().unwrap().as_ref(), b"alert(\"hello!\");");
    }
}
