/**
 * Responsibility
 *
 * 主な責務
 *  - リソースごとの「意味付きID型」を宣言する
 *
 * 置くもの
 *  - BookmarkTag などのタグ型
 *  - type BookmarkPathId = ResourceId<BookmarkTag> のような alias
 *
 * 置かないもの
 *  - parse ロジック
 *  - extractor 実装
 */
use super::core::ResourceId;

// bookmarks
pub enum BookmarkTag {}
pub type BookmarkPathId = ResourceId<BookmarkTag>;
