//! Application constants
//!
//! Centralized location for magic strings and input limits.

/// Directory (under the home directory) holding config and logs
pub const CONFIG_DIR_NAME: &str = ".apitty";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Log file name inside the config directory
pub const LOG_FILE_NAME: &str = "apitty.log";

/// Input character limits
pub const URL_CHAR_LIMIT: usize = 500;
pub const BODY_CHAR_LIMIT: usize = 5000;
pub const HEADER_KEY_CHAR_LIMIT: usize = 100;
pub const HEADER_VALUE_CHAR_LIMIT: usize = 200;
pub const CURL_CHAR_LIMIT: usize = 2000;

/// Lines scrolled per mouse wheel step
pub const WHEEL_SCROLL_LINES: u16 = 3;

/// Rows at the top of the screen that belong to the request bar for mouse clicks
pub const TOP_AREA_ROWS: u16 = 6;

/// Application name
pub const APP_NAME: &str = "apitty";

/// Help popup content
pub const HELP_TEXT: &str = "\
 NAVIGATION
   Tab / Shift+Tab    Cycle focus: Method, URL, Body, Response
   Mouse click        Focus request bar or response
   Mouse wheel        Scroll response

 REQUEST
   j / k              Next / previous method (Method focused)
   Enter              Send request (URL focused)
   Ctrl+S             Send request
   Ctrl+X             Cancel request in flight
   h                  Edit headers
   i                  Import cURL command
   c                  Export request as cURL

 HEADERS FORM
   a / n              Add header
   j / k              Select header
   e / Enter          Edit selected header
   d / x              Delete selected header
   Tab                Switch key / value
   Enter              Save header
   Esc                Back / close

 RESPONSE
   f                  Toggle fullscreen
   t                  Toggle body / headers
   j / k              Scroll one line
   d / u              Scroll half a page
   g / G              Jump to top / bottom

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit
";
