mod article;
mod category;

pub use self::{
    article::{ArticleDraft, CreateArticleRequest, DEFAULT_AUTHOR, parse_scraped_at},
    category::extract_category_names,
};
