use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[month repr:short] [day padding:space] [year]");
const TIME_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]:[second]");

fn main() {
    let now = time::OffsetDateTime::now_utc();

    let date = std::env::var("ATTRKIT_BUILD_DATE")
        .unwrap_or_else(|_| now.format(DATE_FORMAT).unwrap_or_else(|_| "unknown".to_string()));
    let time = std::env::var("ATTRKIT_BUILD_TIME")
        .unwrap_or_else(|_| now.format(TIME_FORMAT).unwrap_or_else(|_| "unknown".to_string()));

    println!("cargo:rerun-if-env-changed=ATTRKIT_BUILD_DATE");
    println!("cargo:rerun-if-env-changed=ATTRKIT_BUILD_TIME");
    println!("cargo:rustc-env=ATTRKIT_BUILD_DATE={}", date);
    println!("cargo:rustc-env=ATTRKIT_BUILD_TIME={}", time);
}
