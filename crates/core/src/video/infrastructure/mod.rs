pub mod ffmpeg_reader;
pub mod image_file_reader;

#[cfg(test)]
pub(crate) mod test_video;
