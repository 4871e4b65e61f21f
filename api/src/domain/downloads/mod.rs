pub mod sample_download;
