//! Static CSV corpora used across harnesses.
//!
//! Headers follow the published form export: a `Timestamp` column first,
//! then the tree fields, then the moderation columns added by reviewers.

/// A small mixed sheet covering each moderation outcome and a dropped row.
///
/// Expected: 6 rows total; `Old oak` and `Field maple` (legacy `verified`)
/// approved; `Hazel` and `Ash` pending; `Rowan` rejected; `Broken` dropped
/// for its coordinates but still counted by growth (2026-01, -02, -03).
pub const SHEET_MIXED: &str = "\
Timestamp,name,access,notes,photo_url,lat,lng,review_status,status
2026-01-15 09:30:00,Old oak,public,By the gate,https://example.org/oak.jpg,52.2053,0.1218,approved,
2026-02-02 14:00:00,Hazel,private,,,52.2100,0.1300,,
2026-02-20 08:15:00,Field maple,public,\"Behind the hall, left side\",,52.2001,0.1150,,verified
2026-03-01 11:00:00,Rowan,public,,,52.1999,0.1101,rejected,verified
2026-03-05 12:00:00,Broken,public,,,abc,0.1,approved,
03/04/2026 10:00:00,Ash,public,,,52.2222,0.1333,pending,verified
";

/// The same shape with the long header names the live form uses.
pub const SHEET_FORM_HEADERS: &str = "\
Timestamp,Tree name / label,Access,Notes / how to find it,Photo URL,Latitude,Longitude,Review status
15/01/2026 09:30:00,Walnut,public,Corner of the park,,52.2,0.12,Approved
16/01/2026 10:00:00,Cherry,public,,,52.3,0.13,
";

/// Header row only.
pub const SHEET_EMPTY: &str = "Timestamp,name,lat,lng,review_status\n";

/// Rows with markup in every free-text field.
pub const SHEET_HOSTILE: &str = "\
name,access,notes,photo_url,lat,lng,review_status
<script>alert(1)</script>,public,\"a & b < c > d \"\"q\"\" 'x'\",https://example.org/p.jpg?a=1&b=2,52.0,0.1,approved
";
