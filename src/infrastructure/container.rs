use std::sync::Arc;

use crate::{
    application::{
        ports::{CompletionProvider, DocumentExtractor, FileStorage, VideoProvider},
        services::{ChatService, DocumentStore, PromptBuilder, QuizEngine, TextChunker},
        use_cases::{
            CreateChatSessionUseCase, DeleteChatSessionUseCase, GenerateQuizUseCase,
            GetChatSessionUseCase, GetProgressUseCase, ListChatSessionsUseCase,
            ListDocumentsUseCase, RecommendVideosUseCase, SendChatMessageUseCase,
            SubmitQuizUseCase, UploadDocumentUseCase,
        },
    },
    domain::repositories::{AttemptRepository, ChatSessionRepository, DocumentRepository},
    infrastructure::{
        config::AppConfig,
        database::{
            create_connection_pool,
            repositories::{
                SqliteAttemptRepository, SqliteChatSessionRepository, SqliteDocumentRepository,
            },
            run_migrations,
        },
        external_services::{
            OpenAiCompletionClient, YoutubeClient, completion_client::CompletionClientConfig,
            document_extractors::PdfExtractor,
        },
        file_system::LocalFileStorage,
    },
    presentation::http::handlers::{ChatHandler, DocumentHandler, QuizHandler, VideoHandler},
};

/// The adapters behind every port. `AppContainer::new` builds the real ones;
/// tests hand in fakes.
pub struct AppPorts {
    pub document_repository: Arc<dyn DocumentRepository>,
    pub attempt_repository: Arc<dyn AttemptRepository>,
    pub chat_session_repository: Arc<dyn ChatSessionRepository>,
    pub document_extractor: Arc<dyn DocumentExtractor>,
    pub file_storage: Arc<dyn FileStorage>,
    pub completion_provider: Arc<dyn CompletionProvider>,
    pub video_provider: Arc<dyn VideoProvider>,
}

pub struct AppContainer {
    pub config: AppConfig,

    // HTTP Handlers
    pub document_handler: Arc<DocumentHandler>,
    pub quiz_handler: Arc<QuizHandler>,
    pub chat_handler: Arc<ChatHandler>,
    pub video_handler: Arc<VideoHandler>,
}

impl AppContainer {
    pub fn new(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let db_pool = create_connection_pool(&config.database_url)?;
        run_migrations(&db_pool)
            .map_err(|e| format!("Failed to run database migrations: {}", e))?;

        let completion_client = OpenAiCompletionClient::new(CompletionClientConfig::from(&config))
            .map_err(|e| format!("Failed to create completion client: {}", e))?;
        if completion_client.is_configured() {
            tracing::info!("Completion provider ready ({})", completion_client.model_name());
        } else {
            tracing::warn!("OPENAI_API_KEY is not set, quiz and chat requests will be rejected");
        }

        let youtube_client = YoutubeClient::new(config.youtube_api_key.clone())
            .map_err(|e| format!("Failed to create YouTube client: {}", e))?;
        if !youtube_client.is_configured() {
            tracing::info!("YOUTUBE_API_KEY is not set, serving placeholder recommendations");
        }

        let ports = AppPorts {
            document_repository: Arc::new(SqliteDocumentRepository::new(db_pool.clone())),
            attempt_repository: Arc::new(SqliteAttemptRepository::new(db_pool.clone())),
            chat_session_repository: Arc::new(SqliteChatSessionRepository::new(db_pool)),
            document_extractor: Arc::new(PdfExtractor::new(config.max_upload_bytes)),
            file_storage: Arc::new(LocalFileStorage::new(config.upload_dir.clone())),
            completion_provider: Arc::new(completion_client),
            video_provider: Arc::new(youtube_client),
        };

        Self::from_parts(config, ports)
    }

    pub fn from_parts(
        config: AppConfig,
        ports: AppPorts,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let chunker = TextChunker::new(config.chunk_size)?;
        let prompt_builder = PromptBuilder::new();

        // Create application services
        let document_store = Arc::new(DocumentStore::new(
            ports.document_extractor,
            ports.file_storage,
            ports.document_repository,
            chunker,
        ));

        let quiz_engine = Arc::new(QuizEngine::new(
            document_store.clone(),
            prompt_builder.clone(),
            ports.completion_provider.clone(),
            ports.attempt_repository.clone(),
        ));

        let chat_service = Arc::new(ChatService::new(
            document_store.clone(),
            prompt_builder,
            ports.completion_provider,
            ports.chat_session_repository,
        ));

        // Create use cases
        let upload_document_use_case = Arc::new(UploadDocumentUseCase::new(document_store.clone()));
        let list_documents_use_case = Arc::new(ListDocumentsUseCase::new(document_store.clone()));
        let generate_quiz_use_case = Arc::new(GenerateQuizUseCase::new(quiz_engine.clone()));
        let submit_quiz_use_case = Arc::new(SubmitQuizUseCase::new(quiz_engine.clone()));
        let get_progress_use_case = Arc::new(GetProgressUseCase::new(ports.attempt_repository));
        let send_chat_message_use_case =
            Arc::new(SendChatMessageUseCase::new(chat_service.clone()));
        let create_chat_session_use_case =
            Arc::new(CreateChatSessionUseCase::new(chat_service.clone()));
        let get_chat_session_use_case = Arc::new(GetChatSessionUseCase::new(chat_service.clone()));
        let list_chat_sessions_use_case =
            Arc::new(ListChatSessionsUseCase::new(chat_service.clone()));
        let delete_chat_session_use_case =
            Arc::new(DeleteChatSessionUseCase::new(chat_service.clone()));
        let recommend_videos_use_case =
            Arc::new(RecommendVideosUseCase::new(ports.video_provider));

        // Create HTTP handlers
        let document_handler = Arc::new(DocumentHandler::new(
            upload_document_use_case,
            list_documents_use_case,
        ));

        let quiz_handler = Arc::new(QuizHandler::new(
            generate_quiz_use_case,
            submit_quiz_use_case,
            get_progress_use_case,
        ));

        let chat_handler = Arc::new(ChatHandler::new(
            send_chat_message_use_case,
            create_chat_session_use_case,
            get_chat_session_use_case,
            list_chat_sessions_use_case,
            delete_chat_session_use_case,
        ));

        let video_handler = Arc::new(VideoHandler::new(recommend_videos_use_case));

        Ok(Self {
            config,
            document_handler,
            quiz_handler,
            chat_handler,
            video_handler,
        })
    }
}
