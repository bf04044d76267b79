pub(crate) use self::text_board::TextBoard;

mod text_board;
