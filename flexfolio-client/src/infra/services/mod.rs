// Service seams the page domains are written against

pub mod api;
