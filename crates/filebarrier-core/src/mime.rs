//! Extension to MIME type lookup
//!
//! A compiled-in table mapping a lowercase file extension to its canonical MIME
//! type(s). Extensions that legitimately map to several types (for example `mp3`,
//! served as both `audio/mpeg` and `audio/mp3`) return a comma-joined list.

/// Look up the MIME type(s) registered for `extension`.
///
/// The extension is matched case-insensitively and may carry a leading dot.
/// Returns a comma-separated list, or an empty string when the extension is unknown.
pub fn lookup(extension: &str) -> &'static str {
    let extension = extension.trim().trim_start_matches('.').to_ascii_lowercase();

    match extension.as_str() {
        // Text
        "txt" | "text" | "log" => "text/plain",
        "csv" => "text/csv",
        "tsv" => "text/tab-separated-values",
        "htm" | "html" => "text/html",
        "css" => "text/css",
        "md" | "markdown" => "text/markdown",
        "rtf" => "application/rtf,text/rtf",
        "xml" => "application/xml,text/xml",
        "ics" => "text/calendar",
        "vcf" => "text/vcard",
        "json" => "application/json",
        "js" | "mjs" => "text/javascript,application/javascript",
        // Documents
        "pdf" => "application/pdf",
        "doc" | "dot" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "docm" => "application/vnd.ms-word.document.macroEnabled.12",
        "dotx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.template",
        "xls" | "xlt" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xlsm" => "application/vnd.ms-excel.sheet.macroEnabled.12",
        "xltx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.template",
        "ppt" | "pps" | "pot" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "pptm" => "application/vnd.ms-powerpoint.presentation.macroEnabled.12",
        "ppsx" => "application/vnd.openxmlformats-officedocument.presentationml.slideshow",
        "odt" => "application/vnd.oasis.opendocument.text",
        "ods" => "application/vnd.oasis.opendocument.spreadsheet",
        "odp" => "application/vnd.oasis.opendocument.presentation",
        "epub" => "application/epub+zip",
        // Images
        "png" => "image/png",
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon,image/vnd.microsoft.icon",
        "psd" => "image/vnd.adobe.photoshop",
        // Audio
        "mp3" => "audio/mpeg,audio/mp3",
        "wav" => "audio/wav,audio/x-wav,audio/wave",
        "ogg" | "oga" => "audio/ogg",
        "opus" => "audio/opus",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        "m4a" => "audio/m4a,audio/x-m4a,audio/mp4",
        "m4b" => "audio/m4b",
        "m4p" => "audio/m4p",
        "m4r" => "audio/x-m4r",
        "mid" | "midi" => "audio/midi",
        "wma" => "audio/x-ms-wma",
        "aif" | "aiff" => "audio/aiff,audio/x-aiff",
        "m3u" => "audio/x-mpegurl,audio/mpegurl",
        "m3u8" => "application/vnd.apple.mpegurl,audio/x-mpegurl,audio/mpegurl",
        // Video
        "mp4" => "video/mp4",
        "m4v" => "video/x-m4v",
        "webm" => "video/webm",
        "ogv" => "video/ogg",
        "mov" | "qt" => "video/quicktime",
        "avi" => "video/x-msvideo,video/avi",
        "wmv" => "video/x-ms-wmv",
        "mkv" => "video/x-matroska",
        "mpg" | "mpeg" => "video/mpeg",
        "flv" => "video/x-flv",
        "3gp" => "video/3gpp",
        "3g2" => "video/3gpp2",
        "ts" => "video/mp2t",
        // Archives
        "zip" => "application/x-zip-compressed,application/zip",
        "rar" => "application/vnd.rar,application/x-rar-compressed",
        "7z" => "application/x-7z-compressed",
        "tar" => "application/x-tar",
        "gz" | "tgz" => "application/gzip,application/x-gzip",
        "bz2" => "application/x-bzip2",
        "xz" => "application/x-xz",
        // Fonts
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        // Binaries
        "exe" | "dll" => "application/x-msdownload",
        "msi" => "application/x-msi",
        "apk" => "application/vnd.android.package-archive",
        "jar" => "application/java-archive",
        "bin" => "application/octet-stream",
        _ => "",
    }
}

/// Look up `extension` and split the result into individual MIME types.
pub fn lookup_all(extension: &str) -> Vec<&'static str> {
    lookup(extension)
        .split(',')
        .filter(|mime| !mime.is_empty())
        .collect()
}
