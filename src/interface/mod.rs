//! Interface layer
//! CLI 파싱, 대화형 쉘, 결과 렌더링, 의존성 조립을 담당한다.

pub mod cli;
